use modmatch_loader::Scope;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How noisy the package manager is allowed to be during introspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
}

/// One complete introspection invocation.
///
/// Everything the package manager needs travels in the query itself, so the
/// same [`PackageManager`](crate::PackageManager) value can serve concurrent
/// calls without shared mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionQuery {
    /// Query the global installation tree instead of the project tree.
    pub global: bool,
    /// Depth of the requested dependency tree. The pipelines only ever need
    /// the direct dependencies.
    pub depth: u32,
    /// Whether the package manager should load each listed module.
    pub loaded: bool,
    /// Whether the package manager may emit progress output.
    pub progress: bool,
    pub log_level: LogLevel,
}

impl IntrospectionQuery {
    pub fn for_scope(scope: Scope) -> Self {
        Self {
            global: scope.is_global(),
            depth: 0,
            loaded: false,
            progress: false,
            log_level: LogLevel::Error,
        }
    }

    pub const fn is_global(&self) -> bool {
        self.global
    }
}

/// A depth-1 dependency tree as reported by the package manager.
///
/// Values carry whatever metadata the package manager attaches; only the
/// keys matter to the pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyTree {
    pub dependencies: Map<String, Value>,

    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Map<String, Value>,
}

impl DependencyTree {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }
}
