//! Documentation coverage: every plugin, skill package and declared skill must
//! have a page under the docs tree.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{LayoutConfig, PackagesConfig, CONFIG_FILE_NAME};
use crate::manifest::{PluginManifest, PLUGIN_MANIFEST, SKILL_MANIFEST};
use crate::report::Report;
use crate::util::{list_subdirs, skill_name};

/// Summary line printed after a coverage run.
pub fn summary(report: &Report) -> String {
    format!("Docs validation complete: {} error(s)", report.error_count())
}

/// Check that every plugin under the plugins root, and every skill its
/// manifest declares, has a documentation page.
///
/// A missing plugins root is not an error: the report carries a single info
/// finding and no checks run.
pub fn check_plugin_docs(root: &Path, layout: &LayoutConfig) -> Result<Report> {
    let mut report = Report::new();

    let plugins_dir = root.join(&layout.plugins_dir);
    if !plugins_dir.is_dir() {
        report.info("No plugins directory found, skipping docs validation");
        return Ok(report);
    }

    let plugins = list_subdirs(&plugins_dir)
        .with_context(|| format!("Failed to list {}", plugins_dir.display()))?;
    info!("Checking docs for {} plugin(s)", plugins.len());

    for (plugin, plugin_dir) in plugins {
        debug!("Checking docs for plugin {}", plugin);
        let plugin_doc = layout.plugin_doc(&plugin);
        if !root.join(&plugin_doc).exists() {
            report.error(format!(
                "Missing docs page for plugin \"{}\": {}",
                plugin,
                plugin_doc.display()
            ));
        }

        let manifest_path = plugin_dir.join(PLUGIN_MANIFEST);
        if !manifest_path.is_file() {
            continue;
        }
        let manifest = match PluginManifest::load(&manifest_path) {
            Ok(manifest) => manifest,
            Err(e) => {
                report.error(e.to_string());
                continue;
            }
        };

        for skill_path in manifest.skills() {
            check_skill_doc(root, layout, &skill_name(skill_path), &mut report);
        }
    }

    Ok(report)
}

/// Check that every configured skill package, and every skill nested in it,
/// has a documentation page.
pub fn check_package_docs(
    root: &Path,
    layout: &LayoutConfig,
    packages: &PackagesConfig,
) -> Result<Report> {
    let mut report = Report::new();

    if packages.is_empty() {
        report.info(format!(
            "No skill packages configured, skipping package docs validation \
             (set [packages] paths or discover in {})",
            CONFIG_FILE_NAME
        ));
        return Ok(report);
    }

    for package_dir in resolve_packages(root, packages)? {
        let Some(package) = package_dir.file_name().and_then(|n| n.to_str()) else {
            warn!("Skipping package path without a name: {}", package_dir.display());
            continue;
        };
        debug!("Checking docs for skill package {}", package);

        if !package_dir.is_dir() {
            report.error(format!(
                "Missing skill package directory: {}",
                package_dir.display()
            ));
            continue;
        }

        let package_doc = layout.plugin_doc(package);
        if !root.join(&package_doc).exists() {
            report.error(format!(
                "Missing docs page for package \"{}\": {}",
                package,
                package_doc.display()
            ));
        }

        let subdirs = list_subdirs(&package_dir)
            .with_context(|| format!("Failed to list {}", package_dir.display()))?;
        for (name, path) in subdirs {
            if layout.is_reserved(&name) || !path.join(SKILL_MANIFEST).is_file() {
                continue;
            }
            check_skill_doc(root, layout, &name, &mut report);
        }
    }

    Ok(report)
}

fn check_skill_doc(root: &Path, layout: &LayoutConfig, skill: &str, report: &mut Report) {
    let skill_doc = layout.skill_doc(skill);
    if !root.join(&skill_doc).exists() {
        report.error(format!(
            "Missing docs page for skill \"{}\": {}",
            skill,
            skill_doc.display()
        ));
    }
}

/// Explicit package paths first, then glob matches not already listed.
fn resolve_packages(root: &Path, packages: &PackagesConfig) -> Result<Vec<PathBuf>> {
    let mut resolved: Vec<PathBuf> = packages.paths.iter().map(|p| root.join(p)).collect();

    if let Some(pattern) = &packages.discover {
        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        let full_pattern = Path::new(&escaped_root).join(pattern);
        let full_pattern = full_pattern.to_string_lossy();
        let mut discovered = Vec::new();
        for entry in glob::glob(&full_pattern)
            .with_context(|| format!("Invalid package discovery pattern: {}", pattern))?
        {
            let path = entry.context("Failed to read package discovery match")?;
            if path.is_dir() && !resolved.contains(&path) {
                discovered.push(path);
            }
        }
        discovered.sort();
        info!(
            "Discovered {} skill package(s) matching {}",
            discovered.len(),
            pattern
        );
        resolved.extend(discovered);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_plugins_root_is_skipped() {
        let root = TempDir::new().unwrap();
        let report = check_plugin_docs(root.path(), &LayoutConfig::default()).unwrap();
        assert!(!report.has_errors());
        assert_eq!(
            report.findings()[0].message,
            "No plugins directory found, skipping docs validation"
        );
    }

    #[test]
    fn test_invalid_manifest_skips_only_that_plugins_skills() {
        let root = TempDir::new().unwrap();
        write(&root.path().join("packages/plugins/broken/.claude-plugin/plugin.json"), "[");
        write(
            &root.path().join("packages/plugins/story-ip/.claude-plugin/plugin.json"),
            r#"{"skills":["skills/register"]}"#,
        );
        write(&root.path().join("docs/plugins/broken.md"), "# broken");
        write(&root.path().join("docs/plugins/story-ip.md"), "# story-ip");

        let report = check_plugin_docs(root.path(), &LayoutConfig::default()).unwrap();
        let messages: Vec<_> = report.errors().map(|f| f.message.clone()).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("invalid JSON"));
        assert_eq!(
            messages[1],
            "Missing docs page for skill \"register\": docs/skills/register.md"
        );
    }

    #[test]
    fn test_no_packages_configured() {
        let root = TempDir::new().unwrap();
        let report = check_package_docs(
            root.path(),
            &LayoutConfig::default(),
            &PackagesConfig::default(),
        )
        .unwrap();
        assert!(!report.has_errors());
        assert_eq!(report.findings().len(), 1);
        let message = &report.findings()[0].message;
        assert!(message.contains("[packages]"));
        assert!(message.contains("skillcheck.toml"));
    }

    #[test]
    fn test_resolve_packages_dedupes_discovery() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("packages/b-skills")).unwrap();
        fs::create_dir_all(root.path().join("packages/a-skills")).unwrap();
        fs::create_dir_all(root.path().join("packages/plugins")).unwrap();

        let packages = PackagesConfig {
            paths: vec!["packages/b-skills".to_string()],
            discover: Some("packages/*-skills".to_string()),
        };
        let resolved = resolve_packages(root.path(), &packages).unwrap();
        assert_eq!(
            resolved,
            vec![
                root.path().join("packages/b-skills"),
                root.path().join("packages/a-skills"),
            ]
        );
    }

    #[test]
    fn test_invalid_discovery_pattern_is_error() {
        let root = TempDir::new().unwrap();
        let packages = PackagesConfig {
            paths: Vec::new(),
            discover: Some("packages/[".to_string()),
        };
        assert!(resolve_packages(root.path(), &packages).is_err());
    }
}
