use anyhow::{bail, Result};
use std::path::Path;

use crate::config::Config;
use crate::package::PackageValidator;
use crate::report::Report;
use crate::skill::EvalPolicy;

pub const USAGE: &str = "Usage: skillcheck package <package-dir> [--require-evals]";

/// `skillcheck package <dir>`: validate one skill package directory.
pub fn run(
    root: &Path,
    config: &Config,
    package_dir: &Path,
    require_evals: bool,
) -> Result<Report> {
    if !package_dir.is_dir() {
        bail!("Package directory not found: {}", package_dir.display());
    }

    let validator =
        PackageValidator::new(root, &config.layout, EvalPolicy::from_strict(require_evals));
    let report = validator.validate(package_dir)?;

    report.print();
    println!("\n{}", report.summary());
    Ok(report)
}
