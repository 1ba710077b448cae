//! Modify command implementation
//!
//! This module implements the `modify` command: locate the configured
//! resources and send tag replacements back to Orthanc.

use super::{client_or_exit_code, load_or_exit_code};
use crate::core::lookup;
use crate::core::modify::{apply, ModificationPlan};
use clap::Args;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Arguments for the modify command
#[derive(Args, Debug)]
pub struct ModifyArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Show the planned modifications without sending them
    #[arg(long)]
    pub dry_run: bool,
}

impl ModifyArgs {
    /// Execute the modify command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting modify command");

        let config = match load_or_exit_code(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };
        let modify = match config.require_modify() {
            Ok(m) => m,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let client = match client_or_exit_code(&config.orthanc) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let located = match lookup::locate(
            &client,
            &modify.patient_id,
            modify.series_number,
            modify.instance_number,
        )
        .await
        {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "Lookup failed");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        let plan = match ModificationPlan::from_config(modify, &located) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        if self.dry_run {
            tracing::info!("Dry run mode enabled - no modification will be sent");
            println!("🔍 DRY RUN MODE - No modification will be sent to Orthanc");
            println!();
        }

        println!("Modification Plan:");
        for (level, id, replace) in plan.steps(&located) {
            println!("  {level} {id}");
            for (tag, value) in replace {
                println!("    {tag} = {value}");
            }
        }
        println!("  Force: {}", plan.force);
        println!("  Keep source: {}", plan.keep_source);
        println!();

        if self.dry_run {
            return Ok(0);
        }

        if !self.yes {
            print!("Proceed with modification? [y/N]: ");
            io::stdout().flush()?;

            if !confirm(&mut BufReader::new(tokio::io::stdin())).await? {
                println!("Modification cancelled.");
                return Ok(0);
            }
        }

        let results = match apply(&client, &located, &plan).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Modification failed");
                eprintln!("❌ Modification failed: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("📊 Modification Summary:");
        for (level, response) in &results {
            println!("  {level}: created {} ({})", response.id, response.path);
        }
        println!();
        println!("✅ Modification completed successfully!");

        Ok(0)
    }
}

/// Reads one answer line; only `y` or `Y` confirms
///
/// The read is async so a pending prompt does not block Ctrl+C handling.
async fn confirm<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<bool> {
    let mut input = String::new();
    reader.read_line(&mut input).await?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_confirm_accepts_only_yes() {
        assert!(confirm(&mut &b"y\n"[..]).await.unwrap());
        assert!(confirm(&mut &b"  Y  \n"[..]).await.unwrap());
        assert!(!confirm(&mut &b"yes\n"[..]).await.unwrap());
        assert!(!confirm(&mut &b"\n"[..]).await.unwrap());
        assert!(!confirm(&mut &b""[..]).await.unwrap());
    }

    #[tokio::test]
    async fn test_pending_prompt_yields_to_other_branches() {
        // Nothing is ever written, so the prompt stays unanswered
        let (_writer, reader) = tokio::io::duplex(64);
        let mut reader = BufReader::new(reader);

        let outcome = tokio::select! {
            _ = confirm(&mut reader) => "answered",
            _ = tokio::time::sleep(Duration::from_millis(20)) => "interrupted",
        };
        assert_eq!(outcome, "interrupted");
    }
}
