use std::fmt;

use modmatch_pattern::Named;

/// The resolution root a module should be loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The caller's project tree.
    Local,
    /// The package manager's global installation tree.
    Global,
}

impl Scope {
    pub const fn is_global(self) -> bool {
        matches!(self, Self::Global)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Global => f.write_str("global"),
        }
    }
}

/// A discovered module, not yet matched or loaded.
///
/// Equality covers both name and scope. The same name can legitimately show
/// up once per scope after the local/global merge; the load stage collapses
/// such pairs by name, preferring the local entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleDescriptor {
    name: String,
    scope: Scope,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, scope: Scope) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::new(name, Scope::Local)
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self::new(name, Scope::Global)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn scope(&self) -> Scope {
        self.scope
    }
}

impl Named for ModuleDescriptor {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ModuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.scope)
    }
}
