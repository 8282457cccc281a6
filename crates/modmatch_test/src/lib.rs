//! Shared test doubles for the resolution pipelines.

mod loader;
mod package_manager;

use modmatch_manifest::Manifest;
use serde_json::{Map, json};

pub use loader::{FakeModule, MockLoader};
pub use package_manager::MockPackageManager;

/// Builds a manifest with version-string values for every listed name.
pub fn manifest(dependencies: &[&str], dev_dependencies: &[&str]) -> Manifest {
    let entry = |name: &&str| ((*name).to_string(), json!("1.0.0"));
    Manifest {
        dependencies: dependencies.iter().map(entry).collect(),
        dev_dependencies: dev_dependencies.iter().map(entry).collect(),
        extra: Map::new(),
    }
}

/// Installs a fmt subscriber honoring `RUST_LOG`, once per test binary.
pub fn setup_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
