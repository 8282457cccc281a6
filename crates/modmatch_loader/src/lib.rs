mod descriptor;
mod result_map;

use std::collections::HashMap;

use thiserror::Error;

pub use descriptor::{ModuleDescriptor, Scope};
pub use result_map::ResultMap;

/// The host's module-loading primitive: resolve a name against the
/// resolution root implied by `scope` and hand back the loaded module.
///
/// This crate never loads anything itself; it only decides what to load and
/// in which order.
pub trait ModuleLoader: Send + Sync {
    type Module;

    fn load(&self, name: &str, scope: Scope) -> anyhow::Result<Self::Module>;
}

impl<L: ModuleLoader + ?Sized> ModuleLoader for &L {
    type Module = L::Module;

    fn load(&self, name: &str, scope: Scope) -> anyhow::Result<Self::Module> {
        (*self).load(name, scope)
    }
}

/// Pairs one loader per resolution root and dispatches on descriptor scope.
#[derive(Debug, Clone)]
pub struct ScopedLoader<L, G> {
    local: L,
    global: G,
}

impl<L, G> ScopedLoader<L, G> {
    pub const fn new(local: L, global: G) -> Self {
        Self { local, global }
    }
}

impl<M, L, G> ModuleLoader for ScopedLoader<L, G>
where
    L: ModuleLoader<Module = M>,
    G: ModuleLoader<Module = M>,
{
    type Module = M;

    fn load(&self, name: &str, scope: Scope) -> anyhow::Result<M> {
        match scope {
            Scope::Local => self.local.load(name, scope),
            Scope::Global => self.global.load(name, scope),
        }
    }
}

/// A matched module could not be loaded.
#[derive(Debug, Error)]
#[error("failed to load module `{module}`: {cause}")]
pub struct ModuleResolutionError {
    module: String,
    cause: anyhow::Error,
}

impl ModuleResolutionError {
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }
}

/// Loads matched descriptors into a [`ResultMap`], one entry per name.
///
/// When a name was matched under both scopes, the local entry wins: local
/// resolution is the more specific one for the caller's working context.
/// Among entries of the same scope the first match wins. Losing entries are
/// never handed to the loader.
pub fn load_descriptors<L: ModuleLoader>(
    loader: &L,
    matched: &[&ModuleDescriptor],
) -> Result<ResultMap<L::Module>, ModuleResolutionError> {
    let mut winner_by_name: HashMap<&str, usize> = HashMap::new();
    let mut winners: Vec<&ModuleDescriptor> = Vec::new();

    for &descriptor in matched {
        match winner_by_name.get(descriptor.name()) {
            None => {
                winner_by_name.insert(descriptor.name(), winners.len());
                winners.push(descriptor);
            }
            Some(&index) => {
                if winners[index].scope().is_global() && descriptor.scope() == Scope::Local {
                    winners[index] = descriptor;
                }
            }
        }
    }

    tracing::debug!(
        "Loading {} module(s) out of {} match(es)",
        winners.len(),
        matched.len()
    );

    let mut result = ResultMap::new();
    for descriptor in winners {
        let module = loader
            .load(descriptor.name(), descriptor.scope())
            .map_err(|cause| ModuleResolutionError {
                module: descriptor.name().to_string(),
                cause,
            })?;
        result.insert(descriptor.name().to_string(), module);
    }

    Ok(result)
}

/// Loads matched plain names, all against the local resolution root.
///
/// Manifest-sourced candidates carry no scope; a name declared in both the
/// regular and the dev section still produces a single entry.
pub fn load_names<L: ModuleLoader, S: AsRef<str>>(
    loader: &L,
    matched: &[S],
) -> Result<ResultMap<L::Module>, ModuleResolutionError> {
    let mut result = ResultMap::new();
    for name in matched {
        let name = name.as_ref();
        if result.contains(name) {
            continue;
        }
        let module = loader
            .load(name, Scope::Local)
            .map_err(|cause| ModuleResolutionError {
                module: name.to_string(),
                cause,
            })?;
        result.insert(name.to_string(), module);
    }

    Ok(result)
}
