//! Grade command implementation
//!
//! This module implements the `grade` command for scoring a saved report
//! against an answer key. A configuration file is optional: when it loads,
//! its `[grading]` section supplies defaults for the flags.

use crate::config::{load_config, GradingConfig};
use crate::core::grading::{
    grade_answers, load_answer_key, load_answers, GradeReport, GradingOptions,
};
use clap::Args;
use std::path::Path;

/// Arguments for the grade command
#[derive(Args, Debug)]
pub struct GradeArgs {
    /// Path to the report JSON to grade
    #[arg(short, long)]
    pub answers: String,

    /// Path to the answer key JSON [default: answer_key.json]
    #[arg(short, long)]
    pub key: Option<String>,

    /// Compare string values case-sensitively
    #[arg(long, conflicts_with = "case_insensitive")]
    pub case_sensitive: bool,

    /// Compare string values case-insensitively, overriding the config
    #[arg(long)]
    pub case_insensitive: bool,

    /// Absolute tolerance for numeric fields
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Print only the score
    #[arg(short, long)]
    pub quiet: bool,
}

impl GradeArgs {
    /// Applies flags over the configured grading settings
    pub fn resolve(&self, base: GradingConfig) -> GradingConfig {
        GradingConfig {
            answer_key_path: self.key.clone().unwrap_or(base.answer_key_path),
            case_sensitive: match (self.case_sensitive, self.case_insensitive) {
                (true, _) => true,
                (_, true) => false,
                _ => base.case_sensitive,
            },
            numeric_tolerance: self.tolerance.unwrap_or(base.numeric_tolerance),
        }
    }

    /// Execute the grade command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let base = if Path::new(config_path).exists() {
            match load_config(config_path) {
                Ok(config) => config.grading,
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring unusable configuration for grading");
                    GradingConfig::default()
                }
            }
        } else {
            GradingConfig::default()
        };
        let settings = self.resolve(base);

        tracing::info!(
            answers = %self.answers,
            key = %settings.answer_key_path,
            "Grading report"
        );

        if !settings.numeric_tolerance.is_finite() || settings.numeric_tolerance < 0.0 {
            eprintln!("❌ --tolerance must be a non-negative number");
            return Ok(2);
        }

        let reference = match load_answer_key(&settings.answer_key_path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let options = GradingOptions {
            case_sensitive: settings.case_sensitive,
            numeric_tolerance: settings.numeric_tolerance,
        };

        let report = match load_answers(&self.answers) {
            Ok(Some(answers)) => grade_answers(&answers, &reference, &options),
            Ok(None) => GradeReport::zero(reference.len()),
            Err(e) => {
                eprintln!("❌ Failed to read answers {}: {e}", self.answers);
                return Ok(5);
            }
        };

        if self.quiet {
            println!("{}", report.score);
        } else {
            println!(
                "📝 Grading {} against {}",
                self.answers, settings.answer_key_path
            );
            println!();
            for field in &report.fields {
                let mark = if field.outcome.is_correct() { "✅" } else { "❌" };
                println!(
                    "  {mark} {:<20} {:?} ({})",
                    field.key,
                    field.outcome,
                    field.outcome.code()
                );
            }
            println!();
            println!("Score: {}/{}", report.score, report.total);
        }

        Ok(if report.is_perfect() { 0 } else { 1 })
    }
}
