//! Prefilter check command implementation.

use anyhow::Result;
use timcalc::{SearchResult, check_prefilter};

use crate::args::SearchArgs;

fn describe(result: &SearchResult, target_freq: u64) -> String {
    let c = &result.candidate;
    format!(
        "psc={} arr={} freq={:.6}Hz delta={:.6}Hz error={:.6}% passes={}",
        c.prescaler,
        c.reload,
        c.achieved_freq,
        c.signed_delta(target_freq),
        c.percent_error,
        result.passes
    )
}

/// Run the check command
pub fn run(args: &SearchArgs) -> Result<()> {
    let config = args.resolve(&args.load_file()?)?;
    let check = check_prefilter(&config)?;

    println!(
        "exhaustive:  {}",
        describe(&check.exhaustive, config.target_freq)
    );
    match &check.prefiltered {
        Some(result) => println!("prefiltered: {}", describe(result, config.target_freq)),
        None => println!(
            "prefiltered: no result within {} passes",
            config.max_passes
        ),
    }
    println!("verdict: {}", check.verdict);

    Ok(())
}
