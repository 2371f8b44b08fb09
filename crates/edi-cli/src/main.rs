#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # edi-cli
//!
//! Command-line interface for the X12 document processing engine.
//!
//! Processes and validates documents from files, lists the supported
//! transaction sets, and runs the JSON-over-HTTP service. Machine-readable
//! output goes to stdout; logs go to stderr.

mod config;
mod server;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use edi_pipeline::{
    EdiService, ProcessMessageRequest, ProcessingOptions, ValidateMessageRequest,
};
use edi_validation::{Severity, ValidationOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;

/// Log filter for one-shot commands unless `RUST_LOG` is set
const COMMAND_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "edi")]
#[command(about = "X12 EDI document processing engine")]
#[command(version)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a document and print the response as JSON
    Process {
        /// Input file path
        input: PathBuf,

        /// Transaction set code (850, 810, 856, 997)
        #[arg(short = 't', long = "type")]
        message_type: String,

        /// Run structural validation before extraction
        #[arg(long)]
        validate_format: bool,

        /// Run business-rule validation after extraction
        #[arg(long)]
        validate_business_rules: bool,

        /// Include the tokenized segments in the response
        #[arg(long)]
        include_raw_segments: bool,

        /// Add a parsing summary message
        #[arg(long)]
        include_parsing_details: bool,

        /// Customer identifier
        #[arg(long, default_value = "")]
        customer: String,
    },

    /// Validate a document's structure and print a report
    Validate {
        /// Input file path
        input: PathBuf,

        /// Transaction set code (850, 810, 856, 997)
        #[arg(short = 't', long = "type")]
        message_type: String,
    },

    /// Print the supported transaction sets as JSON
    Types,

    /// Run the HTTP service
    Serve {
        /// Path to a YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let service = EdiService::default();

    match cli.command {
        Commands::Process {
            input,
            message_type,
            validate_format,
            validate_business_rules,
            include_raw_segments,
            include_parsing_details,
            customer,
        } => {
            init_tracing(COMMAND_LOG_LEVEL);
            let request = ProcessMessageRequest {
                message: read_input(&input)?,
                message_type,
                customer_id: customer,
                options: ProcessingOptions {
                    validate_format,
                    validate_business_rules,
                    include_parsing_details,
                    include_raw_segments,
                },
            };

            let response = service.process_message(&request);
            println!("{}", serde_json::to_string_pretty(&response)?);

            Ok(if response.status.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            })
        }
        Commands::Validate {
            input,
            message_type,
        } => {
            init_tracing(COMMAND_LOG_LEVEL);
            let request = ValidateMessageRequest {
                message: read_input(&input)?,
                message_type,
                customer_id: String::new(),
            };

            let response = service.validate_message(&request);
            let outcome = ValidationOutcome::from(response.messages);
            print!(
                "{}",
                render_report(
                    &input,
                    &response.edi_version,
                    &response.detected_message_type,
                    &outcome
                )
            );

            Ok(ExitCode::from(validation_exit_code(&outcome)))
        }
        Commands::Types => {
            init_tracing(COMMAND_LOG_LEVEL);
            println!(
                "{}",
                serde_json::to_string_pretty(&service.supported_types(None))?
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Serve {
            config: config_path,
        } => {
            let config = ServiceConfig::load(config_path.as_deref())
                .context("Failed to load service configuration")?;
            init_tracing(&config.log_level);
            info!(
                config_file = ?config_path,
                address = %config.bind_address(),
                max_workers = config.max_workers,
                "Loaded service configuration"
            );

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(config.max_workers)
                .enable_all()
                .build()
                .context("Failed to build async runtime")?;
            runtime.block_on(server::serve(&config))?;

            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file '{}'", path.display()))
}

/// 0 when clean, 1 when only warnings were reported, 2 on any error
fn validation_exit_code(outcome: &ValidationOutcome) -> u8 {
    if outcome.has_errors() {
        2
    } else if outcome.count(Severity::Warning) > 0 {
        1
    } else {
        0
    }
}

fn render_report(
    input: &Path,
    version: &str,
    detected_type: &str,
    outcome: &ValidationOutcome,
) -> String {
    let mut report = format!("Validating: {}\n", input.display());
    if !version.is_empty() {
        report.push_str(&format!("EDI version: {version}\n"));
        report.push_str(&format!("Detected message type: {detected_type}\n"));
    }
    for message in outcome.messages() {
        report.push_str(&format!("{message}\n"));
    }
    report.push_str(&format!(
        "Errors: {}\nWarnings: {}\n",
        outcome.count(Severity::Error),
        outcome.count(Severity::Warning)
    ));
    report
}
