use clap::Args;

use crate::{
    config::{ConfigArg, ReportConfig},
    util::Output,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct ShowConfigArg {
    #[command(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &ShowConfigArg) -> anyhow::Result<()> {
    let config = ReportConfig::load(&arg.config)?;
    Output::stdout().write_json(&config)
}
