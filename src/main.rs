//! RackPlan command-line entry point.

use rackplan::cli;
use rackplan::init_logging;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    init_logging()?;
    cli::run_from_env()
}
