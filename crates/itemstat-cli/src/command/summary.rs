//! Console summary of a report run
//!
//! Prints the answer-rate block and the per-question table as aligned text
//! instead of delimited rows.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use itemstat_analysis::{
    aggregate::QuestionExtremes,
    labels::{Label, Locale, question_column},
    report::{ReportAssembler, ReportSummary},
};

use crate::{
    config::{ConfigArg, ReportConfig},
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct SummaryArg {
    /// Path to the input JSON file (students, states, answers)
    input: PathBuf,

    #[command(flatten)]
    config: ConfigArg,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let config = ReportConfig::load(&arg.config)?;
    let input = util::read_input_file(&arg.input)?;
    let report = ReportAssembler::assemble(&input, config.locale)
        .with_context(|| format!("Failed to build report from {}", arg.input.display()))?;
    let locale = config.locale;
    let summary = &report.summary;

    println!("Item Analysis Summary ({})", arg.input.display());
    println!("==========================================\n");

    print_rates(locale, summary);
    println!();

    if summary.questions.is_empty() {
        println!("  (No question table: nobody submitted answers)");
        return Ok(());
    }

    print_extremes(locale, summary);
    println!();

    print_questions(locale, summary);

    for warning in &report.warnings {
        println!("  ! {warning}");
    }

    Ok(())
}

fn print_rates(locale: Locale, summary: &ReportSummary) {
    let t = |label: Label| label.text(locale);
    println!("  {:<28} {:>8}", t(Label::Enrolled), summary.enrolled);
    println!(
        "  {:<28} {:>8} {:>9.1}%",
        t(Label::Answered),
        summary.answered,
        summary.answered_rate * 100.0
    );
    println!(
        "  {:<28} {:>8} {:>9.1}%",
        t(Label::NotAnswered),
        summary.not_answered,
        summary.not_answered_rate * 100.0
    );
    println!("  {:<28} {:>8.3}", t(Label::Mean), summary.mean);
    let std_dev = summary
        .std_dev
        .map_or("N/A".to_string(), |s| format!("{s:.3}"));
    println!("  {:<28} {:>8}", t(Label::StdDev), std_dev);
}

fn print_extremes(locale: Locale, summary: &ReportSummary) {
    let t = |label: Label| label.text(locale);
    let ids = |extremes: Option<&QuestionExtremes>| {
        extremes
            .map(|e| e.ids.join(", "))
            .filter(|ids| !ids.is_empty())
            .unwrap_or_else(|| "-".to_string())
    };
    println!("  {:<40} {}", t(Label::MostCorrect), ids(summary.easiest.as_ref()));
    println!("  {:<40} {}", t(Label::LeastCorrect), ids(summary.hardest.as_ref()));
}

fn print_questions(locale: Locale, summary: &ReportSummary) {
    let t = |label: Label| label.text(locale);
    println!(
        "  {:<12} {:>10} {:>12} {:<22} {:<28} {:>8}",
        t(Label::QuestionTableTitle),
        t(Label::PctCorrect),
        t(Label::PctIncorrect),
        t(Label::DifficultyIndex),
        t(Label::DiscriminationBand),
        "d",
    );
    println!("  {}", "-".repeat(97));
    for q in &summary.questions {
        let index = q
            .discrimination
            .value
            .map_or("N/A".to_string(), |d| format!("{d:.3}"));
        println!(
            "  {:<12} {:>9.1}% {:>11.1}% {:<22} {:<28} {:>8}",
            question_column(locale, q.position),
            q.difficulty.pct_correct * 100.0,
            q.difficulty.pct_incorrect * 100.0,
            q.difficulty.band.label(locale),
            q.discrimination.band.label(locale),
            index,
        );
    }
    println!(
        "  (Discrimination uses quartiles of {} students)",
        summary.quartile
    );
}
