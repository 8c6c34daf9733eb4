//! CLI logic for the Escapement diagram tool.
//!
//! This module contains the core CLI logic for the Escapement diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use escapement::{Diagrammer, EscapementError, config::Dialect};

/// Run the Escapement CLI application
///
/// This function processes the input file through the Escapement pipeline
/// and writes the rendered diagram text to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `EscapementError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
pub fn run(args: &Args) -> Result<(), EscapementError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing machine description"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;

    // A --format flag overrides whatever the configuration chose
    if let Some(format) = &args.format {
        let dialect: Dialect = format.parse().map_err(EscapementError::Config)?;
        app_config.set_dialect(dialect);
    }

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process the description using the Diagrammer API
    let diagrammer = Diagrammer::new(app_config);
    let graph = diagrammer.parse(&source)?;
    let document = diagrammer.render(&graph);

    // Write output file
    fs::write(&args.output, document)?;

    info!(output_file = args.output; "Diagram exported successfully");

    Ok(())
}
