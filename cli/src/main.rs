//! CLI for the issue migrator.
//!
//! Migrates Jira issues or an Aha! release into GitLab, as described by a
//! TOML settings file.

use clap::{Parser, Subcommand};
use issue_migrator::{Credentials, RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Migrator - Move Jira issues and Aha! roadmaps into GitLab.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// What to migrate.
    #[command(subcommand)]
    source: Source,

    /// Path to the settings file.
    #[arg(long, global = true, default_value = "migration.toml")]
    config: PathBuf,

    /// Preview without creating anything in GitLab.
    #[arg(long, global = true)]
    dry_run: bool,

    /// GitLab personal access token.
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    gitlab_token: String,
}

#[derive(Subcommand, Debug)]
enum Source {
    /// Migrate the Jira issues selected by `jira.jql`.
    Jira {
        /// Jira password or API token.
        #[arg(long, env = "JIRA_TOKEN", hide_env_values = true)]
        jira_token: String,
    },

    /// Migrate the Aha! release configured under `[aha]`.
    Aha {
        /// Aha! API token.
        #[arg(long, env = "AHA_TOKEN", hide_env_values = true)]
        aha_token: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the selected migration
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // Compact, single-line output without module paths
        .with(fmt::layer().compact().with_target(false))
        // Falls back to "info" if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let credentials = Credentials::new(args.gitlab_token);

    match args.source {
        Source::Jira { jira_token } => {
            // Only the Jira path carries a Jira password
            let credentials = credentials.with_jira_password(Some(jira_token));
            let runner = Runner::new(RunnerConfig::new(args.config, credentials, args.dry_run))?;
            runner.migrate_jira().await
        }
        Source::Aha { aha_token } => {
            let credentials = credentials.with_aha_token(Some(aha_token));
            let runner = Runner::new(RunnerConfig::new(args.config, credentials, args.dry_run))?;
            runner.migrate_aha().await
        }
    }
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Records fetched: {}", summary.records_fetched);
    println!("  Records migrated: {}", summary.records_migrated);
    println!("  Records skipped: {}", summary.records_skipped);

    if !summary.dry_run {
        println!("  Issues created: {}", summary.issues_created);
        println!("  Issues closed: {}", summary.issues_closed);
        println!("  Notes created: {}", summary.notes_created);
        println!("  Attachments relocated: {}", summary.attachments_relocated);
        println!("  Epics created: {}", summary.epics_created);
        println!("  Epics reused: {}", summary.epics_reused);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_jira_subcommand_with_global_flags() {
        let args = Args::try_parse_from([
            "issue-migrator",
            "--gitlab-token",
            "gl",
            "jira",
            "--jira-token",
            "jt",
            "--dry-run",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert!(args.dry_run);
        assert_eq!(args.config, PathBuf::from("custom.toml"));
        assert!(matches!(args.source, Source::Jira { jira_token } if jira_token == "jt"));
    }

    #[test]
    fn config_defaults_to_migration_toml() {
        let args =
            Args::try_parse_from(["issue-migrator", "--gitlab-token", "gl", "aha", "--aha-token", "at"])
                .unwrap();

        assert_eq!(args.config, PathBuf::from("migration.toml"));
        assert!(!args.dry_run);
    }
}
