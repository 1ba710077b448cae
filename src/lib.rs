// study-inspector - Orthanc study inspection tool
// Copyright (c) 2025 Study Inspector Contributors
// Licensed under the MIT License

//! # study-inspector
//!
//! Query, report on and modify imaging studies stored on an Orthanc PACS
//! server through its REST API.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Locating** an instance by PatientID, SeriesNumber and InstanceNumber
//! - **Reporting** patient, study and series metadata with pixel statistics
//! - **Modifying** patient, study and series tags through Orthanc's `/modify`
//! - **Grading** a saved report against an answer key
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (lookup, pixels, report, modify, grading)
//! - [`adapters`] - External integrations (Orthanc)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use study_inspector::adapters::orthanc::OrthancClient;
//! use study_inspector::config::load_config;
//! use study_inspector::core::lookup;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("study-inspector.toml")?;
//!     let client = OrthancClient::new(config.orthanc)?;
//!
//!     let located = lookup::locate(&client, "A034518", 4, 130).await?;
//!     let today = chrono::Local::now().date_naive();
//!     let info = lookup::build_report(&client, &located, today).await?;
//!
//!     println!("{} rows x {} columns", info.num_rows, info.num_cols);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type
//! [`domain::InspectorError`] maps onto the CLI exit codes through
//! [`domain::InspectorError::exit_code`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
