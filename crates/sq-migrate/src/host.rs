//! Host seam for procedural migration scripts
//!
//! A procedural script file marks its place in the chain; the behavior
//! behind the file is supplied by the embedding application. A [`ScriptHost`]
//! resolves a script path to the bindings the script exports: the
//! `user_version` it declares and its `main` entry point. Resolution must
//! not touch the store.

use sq_db::{DbResult, ScriptConn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Entry point of a procedural migration script
pub type MainFn = Arc<dyn Fn(&ScriptConn<'_>) -> DbResult<()> + Send + Sync>;

/// Bindings exported by a procedural script.
///
/// Either binding may be absent; discovery rejects incomplete scripts before
/// anything runs.
#[derive(Clone, Default)]
pub struct Bindings {
    pub(crate) user_version: Option<u32>,
    pub(crate) main: Option<MainFn>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the version the store is at after this script runs
    pub fn user_version(mut self, version: u32) -> Self {
        self.user_version = Some(version);
        self
    }

    /// Set the script's entry point
    pub fn main<F>(mut self, f: F) -> Self
    where
        F: Fn(&ScriptConn<'_>) -> DbResult<()> + Send + Sync + 'static,
    {
        self.main = Some(Arc::new(f));
        self
    }
}

/// Resolves procedural script files to their exported bindings
pub trait ScriptHost {
    fn resolve(&self, path: &Path) -> Bindings;
}

/// Script host backed by an in-process registry.
///
/// The embedding application registers each procedural script's bindings
/// under its file name (e.g. `2_add_value_column.up.py`). Unregistered
/// files resolve to empty bindings and fail discovery.
#[derive(Clone, Default)]
pub struct Registry {
    scripts: HashMap<String, Bindings>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the bindings for a script file name
    pub fn register(&mut self, file_name: impl Into<String>, bindings: Bindings) -> &mut Self {
        self.scripts.insert(file_name.into(), bindings);
        self
    }
}

impl ScriptHost for Registry {
    fn resolve(&self, path: &Path) -> Bindings {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| self.scripts.get(name))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "host_test.rs"]
mod tests;
