use camino::{Utf8Path, Utf8PathBuf};
use modmatch_metadata::ManifestSettings;
use modmatch_system::System;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A dependency manifest: two sections mapping module names to arbitrary
/// values. Only the keys are ever inspected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub dependencies: Map<String, Value>,

    #[serde(rename = "devDependencies")]
    pub dev_dependencies: Map<String, Value>,

    /// Everything else in the manifest document, carried but not read.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }

    pub fn dev_dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dev_dependencies.keys().map(String::as_str)
    }
}

/// The manifest argument of the manifest pipeline: either an in-memory
/// document or a path reference resolved through the host [`System`].
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestInput {
    Document(Box<Manifest>),
    Path(Utf8PathBuf),
}

impl ManifestInput {
    /// Classifies a dynamically-typed manifest argument.
    ///
    /// A JSON string is a path reference, a JSON object is an inline
    /// document. Every other type is rejected here, before any filesystem
    /// or matching work happens.
    pub fn from_value(value: Value) -> Result<Self, InvalidManifestError> {
        match value {
            Value::String(path) => Ok(Self::Path(Utf8PathBuf::from(path))),
            Value::Object(_) => {
                let manifest =
                    serde_json::from_value(value).map_err(|error| InvalidManifestError {
                        found: format!("a malformed manifest object ({error})"),
                    })?;
                Ok(Self::Document(Box::new(manifest)))
            }
            other => Err(InvalidManifestError {
                found: format!("a JSON {}", json_type_name(&other)),
            }),
        }
    }
}

impl From<Manifest> for ManifestInput {
    fn from(manifest: Manifest) -> Self {
        Self::Document(Box::new(manifest))
    }
}

impl From<Utf8PathBuf> for ManifestInput {
    fn from(path: Utf8PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Utf8Path> for ManifestInput {
    fn from(path: &Utf8Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for ManifestInput {
    fn from(path: &str) -> Self {
        Self::Path(Utf8PathBuf::from(path))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The manifest argument was neither a document nor a path reference.
#[derive(Debug, Error)]
#[error("invalid manifest: expected an object or a path string, got {found}")]
pub struct InvalidManifestError {
    found: String,
}

/// A path-referenced manifest could not be read or parsed.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest at `{path}`: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at `{path}`: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Produces candidate names from a manifest, in declaration order.
///
/// Regular dependencies come first; with `ignore_dev` off, dev dependencies
/// are appended after them. The two sections are not deduplicated against
/// each other, the load stage collapses repeated names.
pub fn collect(
    input: ManifestInput,
    settings: &ManifestSettings,
    system: &dyn System,
) -> Result<Vec<String>, ManifestError> {
    let manifest = match input {
        ManifestInput::Document(manifest) => *manifest,
        ManifestInput::Path(path) => {
            let path = system.absolute(&path);
            let text = system
                .read_to_string(&path)
                .map_err(|source| ManifestError::Read {
                    path: path.clone(),
                    source,
                })?;
            Manifest::from_json_str(&text).map_err(|source| ManifestError::Parse {
                path,
                source,
            })?
        }
    };

    let mut names: Vec<String> = manifest.dependencies.keys().cloned().collect();
    if !settings.ignore_dev {
        names.extend(manifest.dev_dependencies.keys().cloned());
    }

    tracing::debug!("Collected {} candidate(s) from manifest", names.len());

    Ok(names)
}

#[cfg(test)]
mod tests {
    use modmatch_system::OsSystem;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn manifest(dependencies: &[&str], dev_dependencies: &[&str]) -> Manifest {
        let entry = |name: &&str| ((*name).to_string(), json!("1.0.0"));
        Manifest {
            dependencies: dependencies.iter().map(entry).collect(),
            dev_dependencies: dev_dependencies.iter().map(entry).collect(),
            extra: Map::new(),
        }
    }

    fn collect_in_memory(manifest: Manifest, settings: &ManifestSettings) -> Vec<String> {
        // The system is never touched for in-memory documents.
        let system = OsSystem::new(utf8_cwd());
        collect(manifest.into(), settings, &system).expect("collect")
    }

    fn utf8_cwd() -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(std::env::current_dir().expect("cwd")).expect("utf-8 cwd")
    }

    // ── Candidate extraction ────────────────────────────────────────────

    #[test]
    fn dependencies_in_declaration_order() {
        let names = collect_in_memory(
            manifest(&["zeta", "alpha", "mid"], &[]),
            &ManifestSettings::default(),
        );
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn dev_dependencies_ignored_by_default() {
        let names = collect_in_memory(manifest(&["x"], &["y"]), &ManifestSettings::default());
        assert_eq!(names, vec!["x"]);
    }

    #[test]
    fn dev_dependencies_appended_when_requested() {
        let names = collect_in_memory(
            manifest(&["x"], &["y"]),
            &ManifestSettings { ignore_dev: false },
        );
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn name_in_both_sections_appears_twice() {
        let names = collect_in_memory(
            manifest(&["shared", "x"], &["shared"]),
            &ManifestSettings { ignore_dev: false },
        );
        assert_eq!(names, vec!["shared", "x", "shared"]);
    }

    #[test]
    fn values_are_never_inspected() {
        let document = json!({
            "dependencies": { "a": { "nested": [1, 2] }, "b": null },
            "devDependencies": { "c": 7 }
        });
        let input = ManifestInput::from_value(document).expect("classify");
        let system = OsSystem::new(utf8_cwd());
        let names = collect(input, &ManifestSettings { ignore_dev: false }, &system)
            .expect("collect");
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    // ── Argument classification ─────────────────────────────────────────

    #[test]
    fn number_is_an_invalid_manifest() {
        let error = ManifestInput::from_value(json!(420)).expect_err("must be rejected");
        assert!(error.to_string().contains("number"));
    }

    #[test]
    fn null_and_array_are_invalid_manifests() {
        assert!(ManifestInput::from_value(json!(null)).is_err());
        assert!(ManifestInput::from_value(json!(["dependencies"])).is_err());
    }

    #[test]
    fn string_is_a_path_reference() {
        let input = ManifestInput::from_value(json!("/path/to/manifest.json")).expect("classify");
        assert_eq!(
            input,
            ManifestInput::Path(Utf8PathBuf::from("/path/to/manifest.json"))
        );
    }

    #[test]
    fn object_with_non_object_dependencies_is_invalid() {
        assert!(ManifestInput::from_value(json!({ "dependencies": 5 })).is_err());
    }

    // ── Path-referenced manifests ───────────────────────────────────────

    #[test]
    fn path_reference_is_loaded_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cwd = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        let path = cwd.join("package.json");
        std::fs::write(
            path.as_std_path(),
            r#"{ "dependencies": { "a-1": "^1.0.0", "b-1": "*" } }"#,
        )
        .expect("write");

        let system = OsSystem::new(&cwd);
        let names = collect(
            ManifestInput::from("package.json"),
            &ManifestSettings::default(),
            &system,
        )
        .expect("collect");
        assert_eq!(names, vec!["a-1", "b-1"]);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let system = OsSystem::new(utf8_cwd());
        let error = collect(
            ManifestInput::from("does/not/exist.json"),
            &ManifestSettings::default(),
            &system,
        )
        .expect_err("must fail");
        assert!(matches!(error, ManifestError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cwd = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        std::fs::write(cwd.join("package.json").as_std_path(), "not json").expect("write");

        let system = OsSystem::new(&cwd);
        let error = collect(
            ManifestInput::from("package.json"),
            &ManifestSettings::default(),
            &system,
        )
        .expect_err("must fail");
        assert!(matches!(error, ManifestError::Parse { .. }));
    }

    // ── Round-tripping unknown manifest content ─────────────────────────

    #[test]
    fn unknown_manifest_sections_are_preserved() {
        let manifest = Manifest::from_json_str(
            r#"{ "name": "demo", "dependencies": { "a": "1" }, "scripts": { "test": "x" } }"#,
        )
        .expect("parse");
        assert_eq!(manifest.extra.get("name"), Some(&json!("demo")));
        assert_eq!(manifest.dependency_names().collect::<Vec<_>>(), vec!["a"]);
    }
}
