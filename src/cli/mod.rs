//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for study-inspector using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use std::future::Future;

/// study-inspector - Orthanc study query, report and modification tool
#[derive(Parser, Debug)]
#[command(name = "study-inspector")]
#[command(version, about, long_about = None)]
#[command(author = "Study Inspector Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "study-inspector.toml",
        env = "STUDY_INSPECTOR_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STUDY_INSPECTOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Locate an instance and report on it
    Inspect(commands::inspect::InspectArgs),

    /// Send tag replacements for a located patient, study and series
    Modify(commands::modify::ModifyArgs),

    /// Grade a saved report against an answer key
    Grade(commands::grade::GradeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Check connectivity to the Orthanc server
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command fails without a configuration file
    pub fn requires_config(&self) -> bool {
        !matches!(self, Commands::Grade(_) | Commands::Init(_))
    }
}

/// Exit code for an interrupted run
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Resolves to [`INTERRUPTED_EXIT_CODE`] once `signal` fires
///
/// If the signal handler cannot be installed this never resolves, so a
/// command raced against it keeps running.
pub async fn interrupted<F>(signal: F) -> i32
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            tracing::info!("Received SIGINT (Ctrl+C), aborting");
            eprintln!("\n⚠️  Interrupted");
            INTERRUPTED_EXIT_CODE
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_interrupt_signal_yields_130() {
        assert_eq!(interrupted(async { Ok::<(), std::io::Error>(()) }).await, 130);
    }

    #[tokio::test]
    async fn test_failed_signal_install_does_not_interrupt() {
        let outcome = tokio::select! {
            code = interrupted(async { Err(std::io::Error::other("no handler")) }) => code,
            _ = tokio::time::sleep(Duration::from_millis(20)) => 0,
        };
        assert_eq!(outcome, 0);
    }

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::parse_from(["study-inspector", "inspect"]);
        assert_eq!(cli.config, "study-inspector.toml");
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_cli_parse_inspect_overrides() {
        let cli = Cli::parse_from([
            "study-inspector",
            "inspect",
            "--patient-id",
            "A034518",
            "--series-number",
            "4",
            "--instance-number",
            "130",
            "--no-save",
        ]);
        match cli.command {
            Commands::Inspect(args) => {
                assert_eq!(args.patient_id.as_deref(), Some("A034518"));
                assert_eq!(args.series_number, Some(4));
                assert_eq!(args.instance_number, Some(130));
                assert!(args.no_save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_negative_series_number() {
        let cli = Cli::parse_from(["study-inspector", "inspect", "--series-number=-1"]);
        match cli.command {
            Commands::Inspect(args) => assert_eq!(args.series_number, Some(-1)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["study-inspector", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["study-inspector", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_modify() {
        let cli = Cli::parse_from(["study-inspector", "modify", "--yes", "--dry-run"]);
        match cli.command {
            Commands::Modify(args) => {
                assert!(args.yes);
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_grade() {
        let cli = Cli::parse_from(["study-inspector", "grade", "--answers", "study_info.json"]);
        assert!(!cli.command.requires_config());
        match cli.command {
            Commands::Grade(args) => {
                assert_eq!(args.answers, "study_info.json");
                assert!(args.key.is_none());
                assert!(!args.case_sensitive);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_grade_case_flags_conflict() {
        let cli = Cli::parse_from([
            "study-inspector",
            "grade",
            "-a",
            "study_info.json",
            "--case-insensitive",
        ]);
        match cli.command {
            Commands::Grade(args) => assert!(args.case_insensitive),
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Cli::try_parse_from([
            "study-inspector",
            "grade",
            "-a",
            "study_info.json",
            "--case-sensitive",
            "--case-insensitive",
        ])
        .is_err());
    }

    #[test]
    fn test_cli_grade_requires_answers() {
        assert!(Cli::try_parse_from(["study-inspector", "grade"]).is_err());
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["study-inspector", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
        assert!(cli.command.requires_config());
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["study-inspector", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
