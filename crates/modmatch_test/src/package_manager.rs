use std::sync::Mutex;
use std::time::Duration;

use anyhow::anyhow;
use modmatch_env::{DependencyTree, IntrospectionQuery, PackageManager};
use serde_json::json;

/// A [`PackageManager`] with canned per-scope responses.
///
/// Records every query it receives so tests can assert on the exact
/// introspection settings that were passed.
#[derive(Debug)]
pub struct MockPackageManager {
    local: Branch,
    global: Branch,
    local_delay: Duration,
    global_delay: Duration,
    queries: Mutex<Vec<IntrospectionQuery>>,
}

#[derive(Debug, Clone)]
enum Branch {
    Tree(DependencyTree),
    Error(String),
}

impl Branch {
    fn result(&self) -> anyhow::Result<DependencyTree> {
        match self {
            Self::Tree(tree) => Ok(tree.clone()),
            Self::Error(message) => Err(anyhow!("{message}")),
        }
    }
}

pub(crate) fn dependency_tree(dependencies: &[&str], dev_dependencies: &[&str]) -> DependencyTree {
    let entry = |name: &&str| ((*name).to_string(), json!({ "version": "1.0.0" }));
    DependencyTree {
        dependencies: dependencies.iter().map(entry).collect(),
        dev_dependencies: dev_dependencies.iter().map(entry).collect(),
    }
}

impl MockPackageManager {
    pub fn new() -> Self {
        Self {
            local: Branch::Tree(DependencyTree::default()),
            global: Branch::Tree(DependencyTree::default()),
            local_delay: Duration::ZERO,
            global_delay: Duration::ZERO,
            queries: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_local(mut self, dependencies: &[&str]) -> Self {
        self.local = Branch::Tree(dependency_tree(dependencies, &[]));
        self
    }

    #[must_use]
    pub fn with_local_tree(mut self, dependencies: &[&str], dev_dependencies: &[&str]) -> Self {
        self.local = Branch::Tree(dependency_tree(dependencies, dev_dependencies));
        self
    }

    #[must_use]
    pub fn with_local_delay_ms(mut self, dependencies: &[&str], delay_ms: u64) -> Self {
        self.local = Branch::Tree(dependency_tree(dependencies, &[]));
        self.local_delay = Duration::from_millis(delay_ms);
        self
    }

    #[must_use]
    pub fn with_local_error(mut self, message: &str) -> Self {
        self.local = Branch::Error(message.to_string());
        self
    }

    #[must_use]
    pub fn with_global(mut self, dependencies: &[&str]) -> Self {
        self.global = Branch::Tree(dependency_tree(dependencies, &[]));
        self
    }

    #[must_use]
    pub fn with_global_delay_ms(mut self, dependencies: &[&str], delay_ms: u64) -> Self {
        self.global = Branch::Tree(dependency_tree(dependencies, &[]));
        self.global_delay = Duration::from_millis(delay_ms);
        self
    }

    #[must_use]
    pub fn with_global_error(mut self, message: &str) -> Self {
        self.global = Branch::Error(message.to_string());
        self
    }

    pub fn recorded_queries(&self) -> Vec<IntrospectionQuery> {
        self.queries.lock().expect("queries lock").clone()
    }
}

impl Default for MockPackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for MockPackageManager {
    fn query(&self, query: &IntrospectionQuery) -> anyhow::Result<DependencyTree> {
        self.queries
            .lock()
            .expect("queries lock")
            .push(query.clone());

        let (branch, delay) = if query.is_global() {
            (&self.global, self.global_delay)
        } else {
            (&self.local, self.local_delay)
        };

        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        branch.result()
    }
}
