//! Declarative migration script parsing
//!
//! A declarative script is exactly one transaction block. The version it
//! declares is read from a `PRAGMA user_version = <n>;` statement that must
//! be the first or the last statement inside the block. Only line comments
//! are stripped before parsing; block comments are not handled.

use crate::error::{SqlError, SqlResult};
use regex::Regex;
use std::sync::OnceLock;

static TRANSACTION_RE: OnceLock<Regex> = OnceLock::new();
static VERSION_HEAD_RE: OnceLock<Regex> = OnceLock::new();
static VERSION_TAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Get the compiled transaction-wrapper regex (built once, reused)
fn transaction_regex() -> &'static Regex {
    TRANSACTION_RE.get_or_init(|| {
        Regex::new(r"(?is)^begin\s+transaction\s*;(.*)commit\s*;$").expect("valid regex")
    })
}

/// Get the regex matching a version declaration at the start of the body
fn version_head_regex() -> &'static Regex {
    VERSION_HEAD_RE.get_or_init(|| {
        Regex::new(r"(?i)^pragma\s+user_version\s*=\s*(\d+)\s*;").expect("valid regex")
    })
}

/// Get the regex matching a version declaration at the end of the body
fn version_tail_regex() -> &'static Regex {
    VERSION_TAIL_RE.get_or_init(|| {
        Regex::new(r"(?i)pragma\s+user_version\s*=\s*(\d+)\s*;$").expect("valid regex")
    })
}

/// Drop line comments from a script.
///
/// Every line is trimmed and lines starting with `--` are removed.
pub fn strip_line_comments(sql: &str) -> String {
    sql.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Return the statements inside the script's transaction block.
///
/// The script (after comment stripping) must be exactly one
/// `BEGIN TRANSACTION; ... COMMIT;` block, case-insensitive.
pub fn transaction_body(sql: &str) -> SqlResult<String> {
    let caps = transaction_regex()
        .captures(sql.trim())
        .ok_or(SqlError::NotWrappedInTransaction)?;
    Ok(caps[1].to_string())
}

/// Parse a declarative script and return the user_version it declares.
pub fn declared_user_version(sql: &str) -> SqlResult<u32> {
    let body = transaction_body(&strip_line_comments(sql))?;
    let body = body.trim();

    let caps = version_head_regex()
        .captures(body)
        .or_else(|| version_tail_regex().captures(body))
        .ok_or(SqlError::MissingUserVersion)?;
    caps[1].parse().map_err(|_| SqlError::VersionOutOfRange)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
