//! Version Enforcer CLI - Command-line interface for dependency enforcement
//!
//! Architecture: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like file I/O, process exit codes, and terminal output
//! - Provides clean separation between user interface and business logic

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use version_enforcer::{
    DependencyCoordinate, EnforcerConfig, EnforcerError, EnforcerResult, EnforcerValidator,
    OutputFormat, ReportFormatter, ReportOptions, Severity,
};

/// Version Enforcer - Build-time dependency and version enforcement
#[derive(Parser)]
#[command(name = "version-enforcer")]
#[command(version = "0.1.0")]
#[command(about = "Enforces banned dependency versions and structured project versions")]
#[command(
    long_about = "Version Enforcer evaluates a resolved dependency set against a banned-version \
                  pattern (with scope, optionality and include exemptions) and validates the \
                  project version against a structured major.minor.micro.qualifier grammar. \
                  Designed for CI/CD enforcement steps."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a resolved dependency set and/or project version
    Check {
        /// JSON file containing the resolved dependency set
        /// (array of {groupId, artifactId, version, scope?, optional?})
        #[arg(short, long)]
        dependencies: Option<PathBuf>,

        /// Project version string to validate
        #[arg(long)]
        project_version: Option<String>,

        /// Module name used in version failure messages
        #[arg(long, default_value = "project")]
        module_name: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Minimum severity level to report
        #[arg(short, long, value_enum)]
        severity: Option<SeverityArg>,

        /// Maximum number of violations to report
        #[arg(long)]
        max_violations: Option<usize>,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum SeverityArg {
    Info,
    Warning,
    Error,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Info => Severity::Info,
            SeverityArg::Warning => Severity::Warning,
            SeverityArg::Error => Severity::Error,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

fn run_command(cli: Cli) -> EnforcerResult<i32> {
    match cli.command {
        Commands::Check {
            dependencies,
            project_version,
            module_name,
            format,
            severity,
            max_violations,
        } => run_check(
            cli.config,
            dependencies,
            project_version,
            module_name,
            format,
            severity,
            max_violations,
            !cli.no_color,
        ),
        Commands::ValidateConfig { config_file } => {
            run_validate_config(config_file.or(cli.config))
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    config_path: Option<PathBuf>,
    dependencies_path: Option<PathBuf>,
    project_version: Option<String>,
    module_name: String,
    format: OutputFormatArg,
    severity: Option<SeverityArg>,
    max_violations: Option<usize>,
    use_colors: bool,
) -> EnforcerResult<i32> {
    let validator = match config_path {
        Some(path) => EnforcerValidator::from_config_file(path)?,
        None => EnforcerValidator::new()?,
    };

    let dependencies = match dependencies_path {
        Some(path) => load_dependencies(&path)?,
        None => Vec::new(),
    };

    let project = project_version.as_deref().map(|v| (module_name.as_str(), v));
    let report = validator.enforce(&dependencies, project)?;

    let formatter = ReportFormatter::new(ReportOptions {
        use_colors: use_colors && format == OutputFormatArg::Human,
        min_severity: severity.map(Into::into),
        max_violations,
    });
    let output = formatter.format_report(&report, format.into())?;
    println!("{output}");

    Ok(if report.has_errors() { 1 } else { 0 })
}

fn load_dependencies(path: &Path) -> EnforcerResult<Vec<DependencyCoordinate>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        EnforcerError::config(format!(
            "Failed to read dependency report '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        EnforcerError::config(format!(
            "Failed to parse dependency report '{}': {}",
            path.display(),
            e
        ))
    })
}

fn run_validate_config(config_file: Option<PathBuf>) -> EnforcerResult<i32> {
    let path =
        config_file.ok_or_else(|| EnforcerError::config("No configuration file specified"))?;

    match EnforcerConfig::load_from_file(&path) {
        Ok(_) => {
            println!("Configuration '{}' is valid", path.display());
            Ok(0)
        }
        Err(e) => {
            eprintln!("Configuration '{}' is invalid: {}", path.display(), e);
            Ok(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}
