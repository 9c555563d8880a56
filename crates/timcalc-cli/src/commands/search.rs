//! Search command implementation.

use std::io;
use std::time::Instant;

use anyhow::Result;
use timcalc::{
    JsonReport, PassObserver, Report, ReportFormat, TextReport, search_with, validate_duty,
};
use tracing::info;

use crate::args::{OutputFormat, SearchArgs};
use crate::notifier::CliNotifier;

/// Run the search command
pub fn run(args: &SearchArgs, duty: Option<f64>, format: OutputFormat) -> Result<()> {
    let output = if format.notices_on_stderr() {
        execute(args, duty, format, &mut CliNotifier::new(io::stderr()))?
    } else {
        execute(args, duty, format, &mut CliNotifier::new(io::stdout()))?
    };
    print!("{}", output);
    Ok(())
}

/// Resolve and validate the inputs, search, and render the report
fn execute<O: PassObserver>(
    args: &SearchArgs,
    duty: Option<f64>,
    format: OutputFormat,
    observer: &mut O,
) -> Result<String> {
    let file = args.load_file()?;
    let config = args.resolve(&file)?;
    let duty = duty.or(file.duty);
    if let Some(duty) = duty {
        validate_duty(duty)?;
    }

    let started = Instant::now();
    let result = search_with(&config, observer)?;
    info!(
        "Search finished in {:.2?} ({} pass(es), final margin {:.6}%)",
        started.elapsed(),
        result.passes,
        result.tolerance
    );

    let report = Report::new(&result, config.target_freq, duty)?;
    let output = match format {
        OutputFormat::Text => TextReport.format(&report)?,
        OutputFormat::Json => JsonReport.format(&report)?,
    };
    Ok(output)
}
