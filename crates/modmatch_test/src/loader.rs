use std::sync::Mutex;

use anyhow::anyhow;
use modmatch_loader::{ModuleLoader, Scope};

/// What [`MockLoader`] hands back for a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeModule {
    pub name: String,
    pub scope: Scope,
}

/// A [`ModuleLoader`] that fabricates a [`FakeModule`] for every name it is
/// not told to reject, and records every load it performs.
#[derive(Debug, Default)]
pub struct MockLoader {
    missing: Vec<String>,
    loads: Mutex<Vec<(String, Scope)>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_missing(mut self, names: &[&str]) -> Self {
        self.missing = names.iter().map(ToString::to_string).collect();
        self
    }

    pub fn recorded_loads(&self) -> Vec<(String, Scope)> {
        self.loads.lock().expect("loads lock").clone()
    }
}

impl ModuleLoader for MockLoader {
    type Module = FakeModule;

    fn load(&self, name: &str, scope: Scope) -> anyhow::Result<FakeModule> {
        if self.missing.iter().any(|missing| missing == name) {
            return Err(anyhow!("cannot find module `{name}`"));
        }

        self.loads
            .lock()
            .expect("loads lock")
            .push((name.to_string(), scope));

        Ok(FakeModule {
            name: name.to_string(),
            scope,
        })
    }
}
