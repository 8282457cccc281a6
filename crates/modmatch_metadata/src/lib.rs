mod options;
mod settings;

pub use options::{EnvironmentOptions, ManifestOptions};
pub use settings::{EnvironmentSettings, ManifestSettings};
