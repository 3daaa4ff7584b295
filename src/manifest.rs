//! Views of the JSON manifests the checkers read.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Plugin manifest location relative to the plugin directory.
pub const PLUGIN_MANIFEST: &str = ".claude-plugin/plugin.json";
pub const PACKAGE_DESCRIPTOR: &str = "package.json";
pub const PROJECT_DESCRIPTOR: &str = "project.json";
pub const README: &str = "README.md";
pub const SKILL_MANIFEST: &str = "SKILL.md";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `.claude-plugin/plugin.json`
///
/// Held as raw JSON: any well-formed document is accepted and fields of an
/// unexpected type are treated as absent rather than failing the load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginManifest {
    raw: Value,
}

impl PluginManifest {
    pub const REQUIRED_FIELDS: [&'static str; 3] = ["name", "version", "description"];

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        load_json::<Value>(path).map(Self::from)
    }

    /// Required fields that are absent or hold an empty value (`null`,
    /// `false`, `0`, `""`).
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !self.raw.get(*field).is_some_and(is_truthy))
            .collect()
    }

    /// Entries of the `skills` array. Empty unless `skills` is an array.
    pub fn skills(&self) -> Vec<&str> {
        self.path_list("skills")
    }

    /// Entries of the `agents` array. Empty unless `agents` is an array.
    pub fn agents(&self) -> Vec<&str> {
        self.path_list("agents")
    }

    fn path_list(&self, key: &str) -> Vec<&str> {
        let Some(entries) = self.raw.get(key).and_then(Value::as_array) else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| {
                let path = entry.as_str();
                if path.is_none() {
                    warn!("Ignoring non-string entry in \"{}\": {}", key, entry);
                }
                path
            })
            .collect()
    }
}

impl From<Value> for PluginManifest {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

/// `project.json`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDescriptor {
    raw: Value,
}

impl ProjectDescriptor {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        load_json::<Value>(path).map(Self::from)
    }

    /// `tags` is an array holding `tag`, or a string containing it.
    pub fn has_tag(&self, tag: &str) -> bool {
        match self.raw.get("tags") {
            Some(Value::Array(tags)) => tags.iter().any(|t| t.as_str() == Some(tag)),
            Some(Value::String(tags)) => tags.contains(tag),
            _ => false,
        }
    }
}

impl From<Value> for ProjectDescriptor {
    fn from(raw: Value) -> Self {
        Self { raw }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Read and deserialize a JSON manifest.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PluginManifest {
        PluginManifest::from(serde_json::from_str::<Value>(json).unwrap())
    }

    fn project(json: &str) -> ProjectDescriptor {
        ProjectDescriptor::from(serde_json::from_str::<Value>(json).unwrap())
    }

    #[test]
    fn test_missing_fields_all_present() {
        let manifest = parse(r#"{"name":"story-ip","version":"0.1.0","description":"IP"}"#);
        assert!(manifest.missing_fields().is_empty());
    }

    #[test]
    fn test_missing_fields_absent_null_and_empty() {
        let manifest = parse(r#"{"name":"","version":null}"#);
        assert_eq!(
            manifest.missing_fields(),
            vec!["name", "version", "description"]
        );
    }

    #[test]
    fn test_missing_fields_false_and_zero() {
        let manifest = parse(r#"{"name":false,"version":0,"description":"d"}"#);
        assert_eq!(manifest.missing_fields(), vec!["name", "version"]);
    }

    #[test]
    fn test_non_string_fields_count_as_present() {
        let manifest = parse(r#"{"name":"a","version":1,"description":{"en":"d"}}"#);
        assert!(manifest.missing_fields().is_empty());
    }

    #[test]
    fn test_non_object_document_has_no_fields() {
        let manifest = parse(r#""story-ip""#);
        assert_eq!(manifest.missing_fields().len(), 3);
        assert!(manifest.skills().is_empty());
    }

    #[test]
    fn test_skills_and_agents_default_empty() {
        let manifest = parse(r#"{"name":"a"}"#);
        assert!(manifest.skills().is_empty());
        assert!(manifest.agents().is_empty());
    }

    #[test]
    fn test_non_array_lists_are_ignored() {
        let manifest = parse(r#"{"skills":"skills/register","agents":"./agents/"}"#);
        assert!(manifest.skills().is_empty());
        assert!(manifest.agents().is_empty());
    }

    #[test]
    fn test_non_string_list_entries_skipped() {
        let manifest = parse(r#"{"skills":["skills/register",3,null,"skills/mint"]}"#);
        assert_eq!(manifest.skills(), vec!["skills/register", "skills/mint"]);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let manifest = parse(r#"{"name":"a","author":{"name":"x"},"skills":["skills/register"]}"#);
        assert_eq!(manifest.skills(), vec!["skills/register"]);
    }

    #[test]
    fn test_project_descriptor_tag() {
        assert!(project(r#"{"tags":["scope:story","type:plugin"]}"#).has_tag("type:plugin"));
        assert!(!project("{}").has_tag("type:plugin"));
        assert!(!project(r#"{"tags":["type:plugin-extra"]}"#).has_tag("type:plugin"));
    }

    #[test]
    fn test_project_descriptor_tag_string() {
        assert!(project(r#"{"tags":"scope:story,type:plugin"}"#).has_tag("type:plugin"));
        assert!(!project(r#"{"tags":"scope:story"}"#).has_tag("type:plugin"));
        assert!(!project(r#"{"tags":7}"#).has_tag("type:plugin"));
    }

    #[test]
    fn test_load_reports_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plugin.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PluginManifest::load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_load_accepts_unexpected_field_types() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plugin.json");
        fs::write(&path, r#"{"name":"a","version":1,"description":"d","agents":"./agents/"}"#)
            .unwrap();

        let manifest = PluginManifest::load(&path).unwrap();
        assert!(manifest.missing_fields().is_empty());
        assert!(manifest.agents().is_empty());
    }

    #[test]
    fn test_load_reports_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ProjectDescriptor::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }
}
