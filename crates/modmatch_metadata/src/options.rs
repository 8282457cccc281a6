use modmatch_combine::Combine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::settings::{EnvironmentSettings, ManifestSettings};

/// Caller-facing options for the environment pipeline.
///
/// All fields are optional; unset fields fall back to the defaults when the
/// options are resolved into [`EnvironmentSettings`]. Unrecognized keys are
/// preserved in `extra` but not interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvironmentOptions {
    pub is_async: Option<bool>,
    pub global: Option<bool>,
    pub ignore_dev: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EnvironmentOptions {
    fn defaults() -> Self {
        Self {
            is_async: Some(false),
            global: Some(true),
            ignore_dev: Some(true),
            extra: Map::new(),
        }
    }

    /// Resolves the options into settings, taking the caller's value for
    /// every field that is set and the default for every field that is not.
    ///
    /// The options value is consumed (callers keeping their own copy pass a
    /// clone), so nothing here can mutate or alias caller state.
    pub fn into_settings(self) -> EnvironmentSettings {
        let merged = self.combine(Self::defaults());
        EnvironmentSettings {
            is_async: merged.is_async.unwrap_or(false),
            global: merged.global.unwrap_or(true),
            ignore_dev: merged.ignore_dev.unwrap_or(true),
        }
    }
}

impl Combine for EnvironmentOptions {
    fn combine_with(&mut self, other: Self) {
        self.is_async.combine_with(other.is_async);
        self.global.combine_with(other.global);
        self.ignore_dev.combine_with(other.ignore_dev);
        for (key, value) in other.extra {
            self.extra.entry(key).or_insert(value);
        }
    }
}

/// Caller-facing options for the manifest pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestOptions {
    pub ignore_dev: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestOptions {
    fn defaults() -> Self {
        Self {
            ignore_dev: Some(true),
            extra: Map::new(),
        }
    }

    pub fn into_settings(self) -> ManifestSettings {
        let merged = self.combine(Self::defaults());
        ManifestSettings {
            ignore_dev: merged.ignore_dev.unwrap_or(true),
        }
    }
}

impl Combine for ManifestOptions {
    fn combine_with(&mut self, other: Self) {
        self.ignore_dev.combine_with(other.ignore_dev);
        for (key, value) in other.extra {
            self.extra.entry(key).or_insert(value);
        }
    }
}
