/// Resolved settings for the environment pipeline.
///
/// Unlike the options, every field has a concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentSettings {
    pub is_async: bool,
    pub global: bool,
    pub ignore_dev: bool,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        crate::EnvironmentOptions::default().into_settings()
    }
}

/// Resolved settings for the manifest pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestSettings {
    pub ignore_dev: bool,
}

impl Default for ManifestSettings {
    fn default() -> Self {
        crate::ManifestOptions::default().into_settings()
    }
}
