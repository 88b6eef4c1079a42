//! Migration script discovery
//!
//! Scans one directory (non-recursive) for files named
//! `<sequence><anything>.<up|down>.<py|sql>` and turns each match into a
//! [`Script`]. Anything else in the directory is ignored.

use crate::error::ScriptError;
use crate::host::ScriptHost;
use crate::script::{CodeScript, Direction, Script, SqlScript};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static FILENAME_RE: OnceLock<Regex> = OnceLock::new();

/// Get the compiled script file-name regex (built once, reused)
fn filename_regex() -> &'static Regex {
    FILENAME_RE
        .get_or_init(|| Regex::new(r"^(\d+).*\.(up|down)\.(py|sql)$").expect("valid regex"))
}

/// Find all migration scripts in `dir`.
///
/// Declarative (`.sql`) scripts are read and parsed here; procedural
/// (`.py`) scripts are resolved through `host`, which must be free of store
/// side effects. Files whose name does not match the naming convention are
/// silently skipped.
pub fn find_scripts(dir: &Path, host: &dyn ScriptHost) -> Result<Vec<Script>, ScriptError> {
    let entries = fs::read_dir(dir).map_err(|source| ScriptError::Scan {
        path: dir.display().to_string(),
        source,
    })?;

    let mut scripts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScriptError::Scan {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(caps) = filename_regex().captures(name) else {
            log::debug!("skipping {}: not a migration script", name);
            continue;
        };

        let sequence: u32 = caps[1].parse().map_err(|_| ScriptError::InvalidSequence {
            path: path.display().to_string(),
        })?;
        let direction = match &caps[2] {
            "up" => Direction::Up,
            _ => Direction::Down,
        };

        let script = match &caps[3] {
            "sql" => {
                let text = fs::read_to_string(&path).map_err(|source| ScriptError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Script::Sql(SqlScript::new(path, sequence, direction, text)?)
            }
            _ => {
                let bindings = host.resolve(&path);
                Script::Code(CodeScript::new(path, sequence, direction, bindings)?)
            }
        };
        scripts.push(script);
    }

    log::debug!(
        "discovered {} migration scripts in {}",
        scripts.len(),
        dir.display()
    );
    Ok(scripts)
}

#[cfg(test)]
#[path = "discover_test.rs"]
mod tests;
