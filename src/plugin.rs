//! Validation of a single plugin directory.

use std::path::Path;
use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::frontmatter::NESTED_FIELDS;
use crate::manifest::{
    PluginManifest, ProjectDescriptor, PACKAGE_DESCRIPTOR, PLUGIN_MANIFEST,
    PROJECT_DESCRIPTOR, README, SKILL_MANIFEST,
};
use crate::report::Report;
use crate::skill::{check_eval_suite, check_frontmatter, EvalPolicy};
use crate::util::skill_name;

const REQUIRED_FILES: [&str; 4] = [PLUGIN_MANIFEST, PACKAGE_DESCRIPTOR, PROJECT_DESCRIPTOR, README];

pub struct PluginValidator<'a> {
    root: &'a Path,
    layout: &'a LayoutConfig,
    policy: EvalPolicy,
}

impl<'a> PluginValidator<'a> {
    /// `root` is the project root that evaluation suites are resolved against.
    pub fn new(root: &'a Path, layout: &'a LayoutConfig, policy: EvalPolicy) -> Self {
        Self {
            root,
            layout,
            policy,
        }
    }

    /// Run every plugin check against `plugin_dir`.
    pub fn validate(&self, plugin_dir: &Path) -> Report {
        info!("Validating plugin at {}", plugin_dir.display());
        let mut report = Report::new();

        report.merge(self.check_required_files(plugin_dir));

        let manifest_path = plugin_dir.join(PLUGIN_MANIFEST);
        if manifest_path.is_file() {
            match PluginManifest::load(&manifest_path) {
                Ok(manifest) => {
                    report.merge(self.check_manifest_fields(&manifest));
                    report.merge(self.check_skills(plugin_dir, &manifest));
                    report.merge(self.check_agents(plugin_dir, &manifest));
                }
                Err(e) => report.error(e.to_string()),
            }
        }

        report.merge(self.check_project_tags(plugin_dir));
        report
    }

    fn check_required_files(&self, plugin_dir: &Path) -> Report {
        let mut report = Report::new();
        for file in REQUIRED_FILES {
            if !plugin_dir.join(file).exists() {
                report.error(format!("Missing required file: {}", file));
            }
        }
        report
    }

    fn check_manifest_fields(&self, manifest: &PluginManifest) -> Report {
        let mut report = Report::new();
        for field in manifest.missing_fields() {
            report.error(format!("plugin.json missing required field: {}", field));
        }
        report
    }

    fn check_skills(&self, plugin_dir: &Path, manifest: &PluginManifest) -> Report {
        let mut report = Report::new();

        for skill_path in manifest.skills() {
            let skill_md = plugin_dir.join(skill_path).join(SKILL_MANIFEST);
            if skill_md.is_file() {
                report.merge(check_frontmatter(&skill_md, SKILL_MANIFEST, &NESTED_FIELDS));
            } else {
                report.error(format!("Skill SKILL.md not found: {}", skill_md.display()));
            }

            let name = skill_name(skill_path);
            debug!("Checking eval suite for skill {}", name);
            if !check_eval_suite(self.root, self.layout, &name, self.policy, &mut report) {
                report.info(self.layout.eval_suite_hint(&name));
            }
        }

        report
    }

    fn check_agents(&self, plugin_dir: &Path, manifest: &PluginManifest) -> Report {
        let mut report = Report::new();
        for agent_path in manifest.agents() {
            let agent_file = plugin_dir.join(agent_path);
            if !agent_file.exists() {
                report.error(format!("Agent file not found: {}", agent_file.display()));
            }
        }
        report
    }

    fn check_project_tags(&self, plugin_dir: &Path) -> Report {
        let mut report = Report::new();

        let project_path = plugin_dir.join(PROJECT_DESCRIPTOR);
        if !project_path.is_file() {
            return report;
        }

        match ProjectDescriptor::load(&project_path) {
            Ok(project) if project.has_tag(&self.layout.required_tag) => {}
            Ok(_) => report.warn(format!(
                "project.json missing \"{}\" tag",
                self.layout.required_tag
            )),
            Err(e) => report.error(e.to_string()),
        }
        report
    }
}
