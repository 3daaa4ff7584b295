//! skillcheck - documentation and manifest checks for plugin/skill content trees
//!
//! Four independent checkers: docs coverage for plugins, docs coverage for
//! skill packages, single-plugin validation and single-package validation.
//! Each check returns a [`report::Report`]; the binary prints it and exits
//! non-zero when it holds any error.

pub mod cli;
pub mod config;
pub mod coverage;
pub mod frontmatter;
pub mod manifest;
pub mod package;
pub mod plugin;
pub mod report;
pub mod skill;
pub mod util;
