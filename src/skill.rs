//! Checks shared by the plugin and skill-package validators: SKILL.md
//! frontmatter and evaluation suite presence.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::frontmatter::Frontmatter;
use crate::report::Report;

/// How a missing evaluation suite is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EvalPolicy {
    #[default]
    Warn,
    Require,
}

impl EvalPolicy {
    pub fn from_strict(require_evals: bool) -> Self {
        if require_evals {
            EvalPolicy::Require
        } else {
            EvalPolicy::Warn
        }
    }
}

/// Validate the frontmatter of an existing SKILL.md.
///
/// `label` prefixes every message (e.g. `SKILL.md`, `Sub-skill SKILL.md`). A
/// file without the leading delimiter yields exactly one error and no field
/// checks.
pub fn check_frontmatter(path: &Path, label: &str, required: &[&str]) -> Report {
    let mut report = Report::new();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            report.error(format!("Failed to read {}: {}", path.display(), e));
            return report;
        }
    };

    let frontmatter = match Frontmatter::parse(&content) {
        Ok(fm) => fm,
        Err(e) => {
            report.error(format!("{} {}: {}", label, e, path.display()));
            return report;
        }
    };

    for key in frontmatter.missing_keys(required) {
        report.error(format!(
            "{} missing frontmatter field {}: {}",
            label,
            key,
            path.display()
        ));
    }

    debug!(
        "Checked frontmatter of {} ({} issue(s))",
        path.display(),
        report.error_count()
    );
    report
}

/// Check that `evals/suites/<skill>/promptfoo.yaml` exists under `root`.
///
/// Returns `true` when the suite exists. A missing suite is an error under
/// [`EvalPolicy::Require`] and a warning otherwise.
pub fn check_eval_suite(
    root: &Path,
    layout: &LayoutConfig,
    skill: &str,
    policy: EvalPolicy,
    report: &mut Report,
) -> bool {
    let suite = layout.eval_suite(skill);
    if root.join(&suite).is_file() {
        return true;
    }

    let msg = format!(
        "No eval suite found for skill \"{}\" at {}",
        skill,
        suite.display()
    );
    match policy {
        EvalPolicy::Require => report.error(msg),
        EvalPolicy::Warn => report.warn(msg),
    }
    false
}
