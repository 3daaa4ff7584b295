use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "skillcheck.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub packages: PackagesConfig,
}

/// Where the checkers look for content, relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_plugins_dir")]
    pub plugins_dir: String,

    #[serde(default = "default_plugin_docs_dir")]
    pub plugin_docs_dir: String,

    #[serde(default = "default_skill_docs_dir")]
    pub skill_docs_dir: String,

    #[serde(default = "default_eval_suites_dir")]
    pub eval_suites_dir: String,

    /// File that marks a directory under `eval_suites_dir` as a suite
    #[serde(default = "default_eval_suite_file")]
    pub eval_suite_file: String,

    /// Only used in the remediation hint for missing suites
    #[serde(default = "default_eval_template_dir")]
    pub eval_template_dir: String,

    /// Subdirectories of a skill package that never hold skills
    #[serde(default = "default_reserved_dirs")]
    pub reserved_dirs: Vec<String>,

    /// Tag expected in a plugin's project.json
    #[serde(default = "default_required_tag")]
    pub required_tag: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            plugins_dir: default_plugins_dir(),
            plugin_docs_dir: default_plugin_docs_dir(),
            skill_docs_dir: default_skill_docs_dir(),
            eval_suites_dir: default_eval_suites_dir(),
            eval_suite_file: default_eval_suite_file(),
            eval_template_dir: default_eval_template_dir(),
            reserved_dirs: default_reserved_dirs(),
            required_tag: default_required_tag(),
        }
    }
}

fn default_plugins_dir() -> String {
    "packages/plugins".to_string()
}

fn default_plugin_docs_dir() -> String {
    "docs/plugins".to_string()
}

fn default_skill_docs_dir() -> String {
    "docs/skills".to_string()
}

fn default_eval_suites_dir() -> String {
    "evals/suites".to_string()
}

fn default_eval_suite_file() -> String {
    "promptfoo.yaml".to_string()
}

fn default_eval_template_dir() -> String {
    "evals/templates/suite".to_string()
}

fn default_reserved_dirs() -> Vec<String> {
    vec!["references".to_string(), "node_modules".to_string()]
}

fn default_required_tag() -> String {
    "type:plugin".to_string()
}

impl LayoutConfig {
    pub fn is_reserved(&self, dir_name: &str) -> bool {
        self.reserved_dirs.iter().any(|r| r == dir_name)
    }

    /// `docs/plugins/<name>.md`, relative to the project root.
    pub fn plugin_doc(&self, name: &str) -> PathBuf {
        Path::new(&self.plugin_docs_dir).join(format!("{}.md", name))
    }

    /// `docs/skills/<name>.md`, relative to the project root.
    pub fn skill_doc(&self, name: &str) -> PathBuf {
        Path::new(&self.skill_docs_dir).join(format!("{}.md", name))
    }

    /// `evals/suites/<skill>/promptfoo.yaml`, relative to the project root.
    pub fn eval_suite(&self, skill: &str) -> PathBuf {
        Path::new(&self.eval_suites_dir)
            .join(skill)
            .join(&self.eval_suite_file)
    }

    pub fn eval_suite_hint(&self, skill: &str) -> String {
        format!(
            "To create: cp -r {}/ {}/{}/",
            self.eval_template_dir.trim_end_matches('/'),
            self.eval_suites_dir.trim_end_matches('/'),
            skill
        )
    }
}

/// The skill packages covered by `package-docs`.
///
/// Both sources are combined: explicit `paths` first, then every directory
/// matched by the `discover` glob that is not already listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackagesConfig {
    #[serde(default)]
    pub paths: Vec<String>,

    #[serde(default)]
    pub discover: Option<String>,
}

impl PackagesConfig {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.discover.is_none()
    }
}

impl Config {
    /// Load configuration from an explicit path, or search the project root and
    /// the user config directory, falling back to defaults.
    pub fn load_with_path(path: Option<&Path>, root: &Path) -> Result<Self> {
        if let Some(config_path) = path {
            debug!("Loading config from explicit path: {}", config_path.display());
            return Self::load_from_path(config_path);
        }

        let project_config = root.join(CONFIG_FILE_NAME);
        if project_config.is_file() {
            debug!("Loading config from {}", project_config.display());
            return Self::load_from_path(&project_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("skillcheck").join("config.toml");
            if user_config.is_file() {
                debug!("Loading config from {}", user_config.display());
                return Self::load_from_path(&user_config);
            }
        }

        debug!("Using default config");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.layout.plugins_dir, "packages/plugins");
        assert_eq!(config.layout.required_tag, "type:plugin");
        assert!(config.layout.is_reserved("references"));
        assert!(config.layout.is_reserved("node_modules"));
        assert!(!config.layout.is_reserved("register"));
        assert!(config.packages.is_empty());
    }

    #[test]
    fn test_layout_paths() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.plugin_doc("story-ip"), Path::new("docs/plugins/story-ip.md"));
        assert_eq!(layout.skill_doc("register"), Path::new("docs/skills/register.md"));
        assert_eq!(
            layout.eval_suite("register"),
            Path::new("evals/suites/register/promptfoo.yaml")
        );
        assert_eq!(
            layout.eval_suite_hint("register"),
            "To create: cp -r evals/templates/suite/ evals/suites/register/"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[layout]
skill_docs_dir = "site/skills"

[packages]
paths = ["packages/story-skills"]
"#,
        )
        .unwrap();
        assert_eq!(config.layout.skill_docs_dir, "site/skills");
        assert_eq!(config.layout.plugin_docs_dir, "docs/plugins");
        assert_eq!(config.packages.paths, vec!["packages/story-skills"]);
        assert!(config.packages.discover.is_none());
        assert!(!config.packages.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string(&Config::default()).unwrap();
        assert!(toml_str.contains("plugins_dir = \"packages/plugins\""));
        assert!(toml_str.contains("eval_suite_file = \"promptfoo.yaml\""));
    }

    #[test]
    fn test_load_from_project_root() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[packages]\ndiscover = \"packages/*-skills\"\n",
        )
        .unwrap();

        let config = Config::load_with_path(None, dir.path()).unwrap();
        assert_eq!(config.packages.discover.as_deref(), Some("packages/*-skills"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = Config::load_with_path(Some(&missing), dir.path());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file"));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[layout\nplugins_dir = 3").unwrap();
        assert!(Config::load_from_path(&path).is_err());
    }
}
