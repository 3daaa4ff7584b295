use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::coverage::{check_package_docs, check_plugin_docs, summary};
use crate::report::Report;

/// `skillcheck docs`: docs pages for every plugin and its declared skills.
pub fn run_plugins(root: &Path, config: &Config) -> Result<Report> {
    let report = check_plugin_docs(root, &config.layout)?;
    print(&report);
    Ok(report)
}

/// `skillcheck package-docs`: docs pages for configured skill packages.
pub fn run_packages(root: &Path, config: &Config) -> Result<Report> {
    let report = check_package_docs(root, &config.layout, &config.packages)?;
    print(&report);
    Ok(report)
}

fn print(report: &Report) {
    report.print();
    println!("\n{}", summary(report));
}
