use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Args;
use itemstat_analysis::report::ReportAssembler;

use crate::{
    config::{ConfigArg, ReportConfig},
    delimited::DelimitedFormat,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    /// Path to the input JSON file (students, states, answers)
    input: PathBuf,

    #[command(flatten)]
    config: ConfigArg,

    /// Output file path (defaults to stdout)
    #[arg(long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Directory to write a timestamped report file into
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let config = ReportConfig::load(&arg.config)?;
    let input = util::read_input_file(&arg.input)?;
    eprintln!(
        "Loaded {} students, {} states, {} answer sets",
        input.students.len(),
        input.states.len(),
        input.answers.len()
    );

    let report = ReportAssembler::assemble(&input, config.locale)
        .with_context(|| format!("Failed to build report from {}", arg.input.display()))?;
    if !report.warnings.is_empty() {
        eprintln!(
            "{} answer sets differ from the question catalog",
            report.warnings.len()
        );
    }

    let bytes = DelimitedFormat::from_config(&config)?
        .render(&report.rows)
        .context("Failed to render report rows")?;

    let output_path = match &arg.output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            let started_at = chrono::Local::now().naive_local();
            Some(dir.join(config.file_name(started_at)))
        }
        None => arg.output.clone(),
    };
    let mut output = Output::from_output_path(output_path)?;
    output.write_bytes(&bytes)?;
    if let Output::File { path, .. } = &output {
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}
