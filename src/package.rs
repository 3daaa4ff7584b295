//! Validation of a single skill-package directory.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::frontmatter::{BASE_FIELDS, NESTED_FIELDS};
use crate::manifest::{PACKAGE_DESCRIPTOR, SKILL_MANIFEST};
use crate::report::Report;
use crate::skill::{check_eval_suite, check_frontmatter, EvalPolicy};
use crate::util::list_subdirs;

pub struct PackageValidator<'a> {
    root: &'a Path,
    layout: &'a LayoutConfig,
    policy: EvalPolicy,
}

impl<'a> PackageValidator<'a> {
    pub fn new(root: &'a Path, layout: &'a LayoutConfig, policy: EvalPolicy) -> Self {
        Self {
            root,
            layout,
            policy,
        }
    }

    /// Validate the package root SKILL.md, every nested skill and the package
    /// descriptor. Fails only if the package directory cannot be listed.
    pub fn validate(&self, package_dir: &Path) -> Result<Report> {
        info!("Validating skill package at {}", package_dir.display());
        let mut report = Report::new();

        let root_skill = package_dir.join(SKILL_MANIFEST);
        if root_skill.is_file() {
            report.merge(check_frontmatter(&root_skill, SKILL_MANIFEST, &BASE_FIELDS));
        } else {
            report.error(format!("Missing required file: {}", SKILL_MANIFEST));
        }

        let subdirs = list_subdirs(package_dir)
            .with_context(|| format!("Failed to list {}", package_dir.display()))?;
        for (name, path) in subdirs {
            if self.layout.is_reserved(&name) {
                debug!("Skipping reserved directory {}", name);
                continue;
            }
            let skill_md = path.join(SKILL_MANIFEST);
            if !skill_md.is_file() {
                continue;
            }

            report.merge(check_frontmatter(
                &skill_md,
                "Sub-skill SKILL.md",
                &NESTED_FIELDS,
            ));
            check_eval_suite(self.root, self.layout, &name, self.policy, &mut report);
        }

        if !package_dir.join(PACKAGE_DESCRIPTOR).exists() {
            report.warn(format!("Missing {}", PACKAGE_DESCRIPTOR));
        }

        Ok(report)
    }
}
