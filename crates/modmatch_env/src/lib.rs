mod query;

use std::collections::HashSet;
use std::thread;

use crossbeam_channel::unbounded;
use modmatch_loader::{ModuleDescriptor, Scope};
use modmatch_metadata::EnvironmentSettings;
use thiserror::Error;

pub use query::{DependencyTree, IntrospectionQuery, LogLevel};

/// The package manager's installed-module introspection command.
///
/// A query describes one invocation completely; implementations must not
/// read any ambient configuration. The call is expected to be I/O-bound
/// (typically out-of-process) and is run on a worker thread by [`collect`].
pub trait PackageManager: Send + Sync {
    fn query(&self, query: &IntrospectionQuery) -> anyhow::Result<DependencyTree>;
}

impl<P: PackageManager + ?Sized> PackageManager for &P {
    fn query(&self, query: &IntrospectionQuery) -> anyhow::Result<DependencyTree> {
        (*self).query(query)
    }
}

/// Every introspection branch failed.
///
/// Carries the cause from the branch that settled last.
#[derive(Debug, Error)]
#[error("introspection failed for every scope: {cause}")]
pub struct IntrospectionError {
    cause: anyhow::Error,
}

impl IntrospectionError {
    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }
}

/// Collects installed-module descriptors from the package manager.
///
/// The local tree is always queried; with `global` set, the global tree is
/// queried concurrently. The fan-in waits for both branches to settle: a
/// single failed branch is logged and contributes nothing, only two failed
/// branches fail the collect. Merge order is deterministic (local before
/// global) no matter which branch settles first, and the merged list is
/// deduplicated by exact descriptor equality.
pub fn collect<P: PackageManager + ?Sized>(
    package_manager: &P,
    settings: &EnvironmentSettings,
) -> Result<Vec<ModuleDescriptor>, IntrospectionError> {
    let mut scopes = vec![Scope::Local];
    if settings.global {
        scopes.push(Scope::Global);
    }

    let ignore_dev = settings.ignore_dev;

    // Settlement order, not scope order.
    let mut settled: Vec<(Scope, anyhow::Result<Vec<ModuleDescriptor>>)> = Vec::new();

    thread::scope(|s| {
        let (tx, rx) = unbounded();

        for &scope in &scopes {
            let tx = tx.clone();
            s.spawn(move || {
                let _ = tx.send((scope, collect_scope(package_manager, scope, ignore_dev)));
            });
        }

        // Drop the original sender to close the channel
        drop(tx);

        for branch in rx {
            settled.push(branch);
        }
    });

    let mut collected: Vec<(Scope, Vec<ModuleDescriptor>)> = Vec::new();
    let mut last_error = None;

    for (scope, result) in settled {
        match result {
            Ok(modules) => {
                tracing::debug!("{scope} introspection returned {} module(s)", modules.len());
                collected.push((scope, modules));
            }
            Err(error) => {
                tracing::warn!("{scope} introspection failed, continuing without it: {error:#}");
                last_error = Some(error);
            }
        }
    }

    if collected.is_empty() {
        if let Some(cause) = last_error {
            return Err(IntrospectionError { cause });
        }
    }

    let mut candidates = Vec::new();
    for &scope in &scopes {
        if let Some(position) = collected.iter().position(|(settled_scope, _)| *settled_scope == scope)
        {
            candidates.extend(collected.swap_remove(position).1);
        }
    }

    let mut seen = HashSet::new();
    candidates.retain(|descriptor| seen.insert(descriptor.clone()));

    Ok(candidates)
}

fn collect_scope<P: PackageManager + ?Sized>(
    package_manager: &P,
    scope: Scope,
    ignore_dev: bool,
) -> anyhow::Result<Vec<ModuleDescriptor>> {
    let query = IntrospectionQuery::for_scope(scope);
    let tree = package_manager.query(&query)?;

    let mut modules: Vec<ModuleDescriptor> = tree
        .dependencies
        .keys()
        .map(|name| ModuleDescriptor::new(name.clone(), scope))
        .collect();

    // Dev dependencies only exist in the local tree. They extend the
    // production set rather than replacing it.
    if scope == Scope::Local && !ignore_dev {
        modules.extend(
            tree.dev_dependencies
                .keys()
                .map(|name| ModuleDescriptor::new(name.clone(), scope)),
        );
    }

    Ok(modules)
}
