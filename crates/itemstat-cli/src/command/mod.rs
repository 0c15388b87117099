use clap::{Parser, Subcommand};

use crate::logging;

use self::{report::ReportArg, show_config::ShowConfigArg, summary::SummaryArg};

mod report;
mod show_config;
mod summary;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log filter, e.g. `debug` or `itemstat_analysis=trace` (defaults to `RUST_LOG`, then `info`)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build the item analysis report as delimited text
    Report(#[clap(flatten)] ReportArg),
    /// Print answer rates and the per-question table to the console
    Summary(#[clap(flatten)] SummaryArg),
    /// Print the effective report configuration as JSON
    ShowConfig(#[clap(flatten)] ShowConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.log_level.as_deref())?;
    match args.mode {
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::ShowConfig(arg) => show_config::run(&arg)?,
    }
    Ok(())
}
