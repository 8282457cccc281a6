//! Discovers installed modules whose names match one or more patterns and
//! hands them back loaded, keyed by name.
//!
//! Two pipelines share the collect → match → load stages and differ only in
//! where candidates come from:
//!
//! - [`resolve_from_manifest`] reads a dependency manifest (an in-memory
//!   document or a path to one) and is synchronous end to end.
//! - [`resolve_from_environment`] asks the package manager for the installed
//!   local tree and, by default, the global tree as well. The two
//!   introspection calls run concurrently; the result is delivered either
//!   synchronously or as a [`Resolution::Pending`] handle, depending on
//!   [`EnvironmentOptions::is_async`].
//!
//! The host environment supplies the collaborators: a [`System`] for
//! path-referenced manifests, a [`PackageManager`] for introspection, and a
//! [`ModuleLoader`] for turning names into loaded modules.

use std::sync::Arc;

use thiserror::Error;

use modmatch_metadata::EnvironmentSettings;

pub use modmatch_bridge::Task;

pub use modmatch_env::{
    DependencyTree, IntrospectionError, IntrospectionQuery, LogLevel, PackageManager,
};
pub use modmatch_loader::{
    ModuleDescriptor, ModuleLoader, ModuleResolutionError, ResultMap, Scope, ScopedLoader,
};
pub use modmatch_manifest::{
    InvalidManifestError, Manifest, ManifestError, ManifestInput,
};
pub use modmatch_metadata::{EnvironmentOptions, ManifestOptions};
pub use modmatch_pattern::{Named, PatternError, PatternSet};
pub use modmatch_system::{OsSystem, System};

/// Any failure of a resolution pipeline.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    InvalidManifest(#[from] InvalidManifestError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Introspection(#[from] IntrospectionError),

    #[error(transparent)]
    ModuleResolution(#[from] ModuleResolutionError),
}

/// The outcome of [`resolve_from_environment`]: already settled in
/// synchronous mode, a waitable handle in asynchronous mode.
#[derive(Debug)]
pub enum Resolution<M> {
    Ready(ResultMap<M>),
    Pending(Task<Result<ResultMap<M>, ResolveError>>),
}

impl<M: Send + 'static> Resolution<M> {
    /// Settles the resolution. Blocks the calling thread in the `Pending`
    /// case; a no-op in the `Ready` case.
    pub fn wait(self) -> Result<ResultMap<M>, ResolveError> {
        match self {
            Self::Ready(map) => Ok(map),
            Self::Pending(task) => task.wait(),
        }
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Loads the modules declared in a manifest whose names match `patterns`.
///
/// All matches resolve against the local resolution root. Dev dependencies
/// are considered only when the options say so.
pub fn resolve_from_manifest<L: ModuleLoader>(
    patterns: &PatternSet,
    manifest: impl Into<ManifestInput>,
    options: Option<ManifestOptions>,
    system: &dyn System,
    loader: &L,
) -> Result<ResultMap<L::Module>, ResolveError> {
    let settings = options.unwrap_or_default().into_settings();

    let names = modmatch_manifest::collect(manifest.into(), &settings, system)?;
    let matched = patterns.filter(&names);

    tracing::debug!(
        "Manifest pipeline matched {} of {} candidate(s)",
        matched.len(),
        names.len()
    );

    Ok(modmatch_loader::load_names(loader, &matched)?)
}

/// Like [`resolve_from_manifest`], for a dynamically-typed manifest
/// argument: a JSON object is an inline document, a JSON string is a path
/// reference, anything else fails with
/// [`InvalidManifestError`](ResolveError::InvalidManifest) before any I/O.
pub fn resolve_from_manifest_value<L: ModuleLoader>(
    patterns: &PatternSet,
    manifest: serde_json::Value,
    options: Option<ManifestOptions>,
    system: &dyn System,
    loader: &L,
) -> Result<ResultMap<L::Module>, ResolveError> {
    let input = ManifestInput::from_value(manifest)?;
    resolve_from_manifest(patterns, input, options, system, loader)
}

/// Loads the installed modules whose names match `patterns`.
///
/// The whole pipeline runs on a worker thread. With `is_async` unset or
/// false, this call blocks until the pipeline settles and returns
/// [`Resolution::Ready`] or the failure; with `is_async` set, it returns
/// [`Resolution::Pending`] immediately and the caller settles it via
/// [`Resolution::wait`]. Both modes produce identical content for identical
/// inputs.
pub fn resolve_from_environment<P, L>(
    patterns: &PatternSet,
    options: Option<EnvironmentOptions>,
    package_manager: Arc<P>,
    loader: Arc<L>,
) -> Result<Resolution<L::Module>, ResolveError>
where
    P: PackageManager + 'static,
    L: ModuleLoader + 'static,
    L::Module: Send + 'static,
{
    let settings = options.unwrap_or_default().into_settings();
    let patterns = patterns.clone();

    let task = Task::spawn(move || {
        environment_pipeline(&patterns, settings, &*package_manager, &*loader)
    });

    if settings.is_async {
        Ok(Resolution::Pending(task))
    } else {
        task.wait().map(Resolution::Ready)
    }
}

fn environment_pipeline<P, L>(
    patterns: &PatternSet,
    settings: EnvironmentSettings,
    package_manager: &P,
    loader: &L,
) -> Result<ResultMap<L::Module>, ResolveError>
where
    P: PackageManager,
    L: ModuleLoader,
{
    let candidates = modmatch_env::collect(package_manager, &settings)?;
    let matched = patterns.filter(&candidates);

    tracing::debug!(
        "Environment pipeline matched {} of {} candidate(s)",
        matched.len(),
        candidates.len()
    );

    Ok(modmatch_loader::load_descriptors(loader, &matched)?)
}
