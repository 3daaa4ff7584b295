use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skillcheck::cli;
use skillcheck::config::Config;
use skillcheck::report::Report;

#[derive(Parser)]
#[command(name = "skillcheck", version)]
#[command(about = "Check docs coverage and manifests of plugin and skill packages", long_about = None)]
struct Cli {
    /// Project root that docs, evals and packages are resolved against
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Path to config file (defaults to <root>/skillcheck.toml or ~/.config/skillcheck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every plugin and its declared skills have docs pages
    Docs,

    /// Check that every configured skill package and its skills have docs pages
    PackageDocs,

    /// Validate a plugin directory
    Plugin {
        /// Plugin directory
        plugin_dir: Option<PathBuf>,

        /// Treat missing eval suites as errors
        #[arg(long)]
        require_evals: bool,
    },

    /// Validate a skill package directory
    Package {
        /// Skill package directory
        package_dir: Option<PathBuf>,

        /// Treat missing eval suites as errors
        #[arg(long)]
        require_evals: bool,
    },
}

/// A subcommand with its required arguments resolved.
#[derive(Debug, PartialEq)]
enum Check {
    Docs,
    PackageDocs,
    Plugin { plugin_dir: PathBuf, require_evals: bool },
    Package { package_dir: PathBuf, require_evals: bool },
}

impl Commands {
    /// Resolve the subcommand, or return its usage line when the directory
    /// argument is missing.
    fn into_check(self) -> std::result::Result<Check, &'static str> {
        match self {
            Commands::Docs => Ok(Check::Docs),
            Commands::PackageDocs => Ok(Check::PackageDocs),
            Commands::Plugin {
                plugin_dir,
                require_evals,
            } => plugin_dir
                .map(|plugin_dir| Check::Plugin {
                    plugin_dir,
                    require_evals,
                })
                .ok_or(cli::plugin::USAGE),
            Commands::Package {
                package_dir,
                require_evals,
            } => package_dir
                .map(|package_dir| Check::Package {
                    package_dir,
                    require_evals,
                })
                .ok_or(cli::package::USAGE),
        }
    }
}

fn run_check(check: Check, root: &Path, config: &Config) -> Result<Report> {
    match check {
        Check::Docs => cli::docs::run_plugins(root, config),
        Check::PackageDocs => cli::docs::run_packages(root, config),
        Check::Plugin {
            plugin_dir,
            require_evals,
        } => cli::plugin::run(root, config, &plugin_dir, require_evals),
        Check::Package {
            package_dir,
            require_evals,
        } => cli::package::run(root, config, &package_dir, require_evals),
    }
}

/// Process exit status for a finished run: 1 when any error was reported.
fn exit_status(report: &Report) -> u8 {
    if report.has_errors() {
        1
    } else {
        0
    }
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let check = match cli.command.into_check() {
        Ok(check) => check,
        Err(usage) => {
            eprintln!("{}", usage);
            return Ok(ExitCode::FAILURE);
        }
    };

    let config = Config::load_with_path(cli.config.as_deref(), &cli.root)?;
    let report = run_check(check, &cli.root, &config)?;
    Ok(ExitCode::from(exit_status(&report)))
}
