use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::plugin::PluginValidator;
use crate::report::Report;
use crate::skill::EvalPolicy;

pub const USAGE: &str = "Usage: skillcheck plugin <plugin-dir> [--require-evals]";

/// `skillcheck plugin <dir>`: validate one plugin directory.
///
/// A directory that does not exist is not special-cased: each required file is
/// reported missing.
pub fn run(
    root: &Path,
    config: &Config,
    plugin_dir: &Path,
    require_evals: bool,
) -> Result<Report> {
    let validator =
        PluginValidator::new(root, &config.layout, EvalPolicy::from_strict(require_evals));
    let report = validator.validate(plugin_dir);

    report.print();
    println!("\n{}", report.summary());
    Ok(report)
}
