//! Report assembly
//!
//! [`ReportAssembler`] drives a single forward pass over the input and emits
//! the report rows in a fixed order:
//!
//! ```text
//! Init
//!  └─ emit_header          question columns discovered, header row
//!     HeaderEmitted
//!      └─ emit_detail_rows  one row per enrolled respondent
//!         DetailRowsEmitted
//!          └─ emit_summary   answer rates, mean, standard deviation
//!             SummaryEmitted
//!              └─ emit_question_table  extremes and per-question table
//!                 Done
//! ```
//!
//! Calling a step out of order fails with [`AnalysisError::PhaseOrder`].
//! [`ReportAssembler::assemble`] runs every step in sequence.

use std::collections::HashMap;

use crate::{
    aggregate::{AggregateStatistics, QuestionDifficulty, QuestionExtremes},
    catalog::{CatalogMismatch, QuestionCatalog},
    discrimination::{DiscriminationCalculator, DiscriminationIndex},
    error::AnalysisError,
    input::{AnswerRecord, ReportInput, Student},
    labels::{Label, Locale, question_column, question_short},
    normalize::{DetailRow, normalize_student},
    quartile::QuartileTracker,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Phase {
    Init,
    HeaderEmitted,
    DetailRowsEmitted,
    SummaryEmitted,
    Done,
}

/// A scalar report cell. Formatting is left to the serializer.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Number(f64),
    Empty,
}

impl Cell {
    #[must_use]
    pub fn count(n: usize) -> Self {
        Self::Integer(n as u64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

pub type Row = Vec<Cell>;

/// Structured figures behind the summary block and the question table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub enrolled: usize,
    pub answered: usize,
    pub not_answered: usize,
    pub answered_rate: f64,
    pub not_answered_rate: f64,
    pub mean: f64,
    /// `None` when nobody answered
    pub std_dev: Option<f64>,
    /// `0` when fewer than four students answered
    pub quartile: usize,
    pub easiest: Option<QuestionExtremes>,
    pub hardest: Option<QuestionExtremes>,
    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSummary {
    /// 1-based column position
    pub position: usize,
    pub answer_id: String,
    pub question_text: String,
    pub correct_answer_text: String,
    pub difficulty: QuestionDifficulty,
    pub discrimination: DiscriminationIndex,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub rows: Vec<Row>,
    /// Answer sets that did not match the question catalog
    pub warnings: Vec<CatalogMismatch>,
    pub summary: ReportSummary,
}

#[derive(Debug)]
pub struct ReportAssembler<'a> {
    input: &'a ReportInput,
    locale: Locale,
    phase: Phase,
    enrolled: HashMap<&'a str, &'a Student>,
    answers: HashMap<&'a str, &'a [AnswerRecord]>,
    question_ids: Option<Vec<String>>,
    catalog: QuestionCatalog,
    warnings: Vec<CatalogMismatch>,
    provisional_quartile: usize,
    stats: AggregateStatistics,
    best: QuartileTracker,
    worst: QuartileTracker,
    rows: Vec<Row>,
    summary: Option<ReportSummary>,
}

impl<'a> ReportAssembler<'a> {
    /// Prepares a pass: builds the question catalog and validates every
    /// answer set against it.
    #[must_use]
    pub fn new(input: &'a ReportInput, locale: Locale) -> Self {
        let catalog = QuestionCatalog::from_answers(&input.answers);
        if catalog.is_empty() {
            tracing::debug!("no answer records, question table will be skipped");
        }
        let warnings = catalog.validate(&input.answers);
        for mismatch in &warnings {
            tracing::warn!("{mismatch}");
        }
        Self {
            input,
            locale,
            phase: Phase::Init,
            enrolled: input.enrolled(),
            answers: input.answers_by_user(),
            question_ids: None,
            catalog,
            warnings,
            provisional_quartile: input.answers.len() / 4,
            stats: AggregateStatistics::new(),
            best: QuartileTracker::best(),
            worst: QuartileTracker::worst(),
            rows: vec![],
            summary: None,
        }
    }

    /// Runs the whole pass.
    pub fn assemble(input: &'a ReportInput, locale: Locale) -> Result<Report, AnalysisError> {
        let mut assembler = Self::new(input, locale);
        assembler.emit_header()?;
        assembler.emit_detail_rows()?;
        assembler.emit_summary()?;
        assembler.emit_question_table()?;
        assembler.finish()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn question_ids(&self) -> Option<&[String]> {
        self.question_ids.as_deref()
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), AnalysisError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(AnalysisError::PhaseOrder {
                expected,
                actual: self.phase,
            })
        }
    }

    fn label(&self, label: Label) -> Cell {
        label.text(self.locale).into()
    }

    fn blank(&mut self) {
        self.rows.push(vec![]);
    }

    /// Discovers the question columns from the first submitted state and
    /// emits the header row.
    pub fn emit_header(&mut self) -> Result<(), AnalysisError> {
        self.expect_phase(Phase::Init)?;

        self.question_ids = self
            .input
            .states
            .iter()
            .find(|s| s.state.attempts.is_some())
            .map(|s| s.state.answer_ids().map(str::to_owned).collect::<Vec<_>>());

        if let Some(ids) = &self.question_ids {
            tracing::info!(questions = ids.len(), "question columns discovered");
            let mut header = vec![
                self.label(Label::Username),
                self.label(Label::Email),
                self.label(Label::ExternalId),
                self.label(Label::Attempts),
            ];
            header.extend((1..=ids.len()).map(|n| Cell::Text(question_column(self.locale, n))));
            header.extend([
                self.label(Label::PointsEarned),
                self.label(Label::PointsPossible),
                self.label(Label::Score),
            ]);
            self.rows.push(header);
        } else {
            tracing::info!("no submitted state, detail rows will be skipped");
        }

        self.phase = Phase::HeaderEmitted;
        Ok(())
    }

    /// Normalizes every enrolled respondent, in state order.
    pub fn emit_detail_rows(&mut self) -> Result<(), AnalysisError> {
        self.expect_phase(Phase::HeaderEmitted)?;

        if let Some(question_ids) = &self.question_ids {
            for state in &self.input.states {
                let username = state.username.as_str();
                let Some(student) = self.enrolled.get(username) else {
                    tracing::debug!(username, "not enrolled, skipping");
                    continue;
                };
                let Some(records) = self.answers.get(username).filter(|r| !r.is_empty()) else {
                    tracing::debug!(username, "no answer records, skipping");
                    continue;
                };
                let Some(response) =
                    normalize_student(student, &state.state, records, question_ids)?
                else {
                    continue;
                };
                self.rows.push(detail_cells(response.row));
                self.stats.record(&response.fragment);
                self.best.offer(&response.fragment, self.provisional_quartile);
                self.worst.offer(&response.fragment, self.provisional_quartile);
            }
        }

        self.phase = Phase::DetailRowsEmitted;
        Ok(())
    }

    /// Emits the answer-rate block.
    pub fn emit_summary(&mut self) -> Result<(), AnalysisError> {
        self.expect_phase(Phase::DetailRowsEmitted)?;

        let enrolled = self.input.students.len();
        let summary = ReportSummary {
            enrolled,
            answered: self.stats.answered(),
            not_answered: self.stats.not_answered(enrolled),
            answered_rate: self.stats.answered_rate(enrolled),
            not_answered_rate: self.stats.not_answered_rate(enrolled),
            mean: self.stats.mean(),
            std_dev: self.stats.std_dev(),
            quartile: self.stats.answered() / 4,
            easiest: None,
            hardest: None,
            questions: vec![],
        };
        tracing::info!(
            enrolled,
            answered = summary.answered,
            not_answered = summary.not_answered,
            "responses aggregated"
        );

        self.blank();
        self.blank();
        self.rows.push(vec![self.label(Label::Analytics)]);
        self.blank();
        self.rows
            .push(vec![Cell::from(""), Cell::from(""), self.label(Label::Percent)]);
        self.rows
            .push(vec![self.label(Label::Enrolled), Cell::count(enrolled)]);
        self.rows.push(vec![
            self.label(Label::Answered),
            Cell::count(summary.answered),
            summary.answered_rate.into(),
        ]);
        self.rows.push(vec![
            self.label(Label::NotAnswered),
            Cell::count(summary.not_answered),
            summary.not_answered_rate.into(),
        ]);
        self.rows
            .push(vec![self.label(Label::Mean), summary.mean.into()]);
        self.rows.push(vec![
            self.label(Label::StdDev),
            summary.std_dev.map_or(Cell::Empty, Cell::Number),
        ]);

        self.summary = Some(summary);
        self.phase = Phase::SummaryEmitted;
        Ok(())
    }

    /// Emits the easiest/hardest rows and the per-question table.
    ///
    /// Skipped when no question columns were discovered, the catalog is empty
    /// or nobody answered.
    pub fn emit_question_table(&mut self) -> Result<(), AnalysisError> {
        self.expect_phase(Phase::SummaryEmitted)?;

        let best = std::mem::replace(&mut self.best, QuartileTracker::best());
        let worst = std::mem::replace(&mut self.worst, QuartileTracker::worst());
        let calculator = DiscriminationCalculator::reconcile(
            best,
            worst,
            self.provisional_quartile,
            self.stats.answered(),
        );

        let question_ids = self.question_ids.clone().unwrap_or_default();
        if question_ids.is_empty() || self.catalog.is_empty() || self.stats.answered() == 0 {
            tracing::debug!("no respondents or questions, question table skipped");
        } else {
            let easiest = self.stats.easiest();
            let hardest = self.stats.hardest();
            self.emit_extremes(&question_ids, &easiest, &hardest);

            let questions = question_ids
                .iter()
                .enumerate()
                .map(|(i, id)| self.question_summary(&calculator, i + 1, id))
                .collect::<Result<Vec<_>, _>>()?;
            self.emit_questions(&questions);

            if let Some(summary) = &mut self.summary {
                summary.easiest = Some(easiest);
                summary.hardest = Some(hardest);
                summary.questions = questions;
            }
        }
        self.phase = Phase::Done;
        Ok(())
    }

    fn question_summary(
        &self,
        calculator: &DiscriminationCalculator,
        position: usize,
        answer_id: &str,
    ) -> Result<QuestionSummary, AnalysisError> {
        let entry = self.catalog.get(answer_id);
        Ok(QuestionSummary {
            position,
            answer_id: answer_id.to_owned(),
            question_text: entry.map(|e| e.question_text.clone()).unwrap_or_default(),
            correct_answer_text: entry
                .map(|e| e.correct_answer_text.clone())
                .unwrap_or_default(),
            difficulty: self.stats.difficulty(answer_id),
            discrimination: calculator.index(answer_id)?,
        })
    }

    fn emit_extremes(
        &mut self,
        question_ids: &[String],
        easiest: &QuestionExtremes,
        hardest: &QuestionExtremes,
    ) {
        self.blank();
        self.rows.push(vec![
            Cell::from(""),
            self.label(Label::Questions),
            self.label(Label::Correct),
            self.label(Label::PctCorrect),
            self.label(Label::Incorrect),
            self.label(Label::PctIncorrect),
        ]);
        self.rows.push(vec![
            self.label(Label::MostCorrect),
            positions_label(question_ids, &easiest.ids).into(),
            Cell::count(easiest.count),
            easiest.pct.into(),
            Cell::count(easiest.complement_count),
            easiest.complement_pct.into(),
        ]);
        self.rows.push(vec![
            self.label(Label::LeastCorrect),
            positions_label(question_ids, &hardest.ids).into(),
            Cell::count(hardest.complement_count),
            hardest.complement_pct.into(),
            Cell::count(hardest.count),
            hardest.pct.into(),
        ]);
        self.blank();
        self.blank();
    }

    fn emit_questions(&mut self, questions: &[QuestionSummary]) {
        self.rows.push(vec![
            self.label(Label::QuestionTableTitle),
            Cell::from(""),
            self.label(Label::CorrectAnswer),
            self.label(Label::DifficultyIndex),
            self.label(Label::PctCorrect),
            self.label(Label::PctIncorrect),
            self.label(Label::DiscriminationBand),
            self.label(Label::DiscriminationIndex),
        ]);
        for q in questions {
            self.rows.push(vec![
                Cell::Text(question_column(self.locale, q.position)),
                q.question_text.as_str().into(),
                q.correct_answer_text.as_str().into(),
                q.difficulty.band.label(self.locale).into(),
                q.difficulty.pct_correct.into(),
                q.difficulty.pct_incorrect.into(),
                q.discrimination.band.label(self.locale).into(),
                q.discrimination.value.map_or(Cell::Empty, Cell::Number),
            ]);
        }
    }

    /// Consumes a completed assembler.
    pub fn finish(self) -> Result<Report, AnalysisError> {
        self.expect_phase(Phase::Done)?;
        let summary = self.summary.ok_or(AnalysisError::PhaseOrder {
            expected: Phase::SummaryEmitted,
            actual: self.phase,
        })?;
        Ok(Report {
            rows: self.rows,
            warnings: self.warnings,
            summary,
        })
    }
}

fn detail_cells(row: DetailRow) -> Row {
    let mut cells = vec![
        Cell::Text(row.username),
        Cell::Text(row.email),
        Cell::Text(row.external_id),
        Cell::Integer(row.attempts),
    ];
    cells.extend(row.answers.into_iter().map(Cell::Text));
    cells.extend([
        Cell::Number(row.raw_earned),
        Cell::Number(row.raw_possible),
        Cell::Number(row.score),
    ]);
    cells
}

/// `P1 - P3` style list; ids outside the question columns keep their raw id.
fn positions_label(question_ids: &[String], ids: &[String]) -> String {
    ids.iter()
        .map(|id| {
            question_ids
                .iter()
                .position(|q| q == id)
                .map_or_else(|| id.clone(), |i| question_short(i + 1))
        })
        .collect::<Vec<_>>()
        .join(" - ")
}
