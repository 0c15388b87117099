//! Item analysis of graded question responses
//!
//! This crate turns the per-student answers to one problem into a tabular
//! report: one detail row per respondent followed by cohort statistics and a
//! per-question table with difficulty and discrimination indices.
//!
//! # Overview
//!
//! A report is built in one pass over the input:
//!
//! 1. **Normalize** ([`normalize::normalize_student`]): shape each student's
//!    answers against the fixed question columns and derive their score
//! 2. **Aggregate** ([`aggregate::AggregateStatistics`]): answer rates, mean,
//!    population standard deviation and per-question correctness tallies
//! 3. **Select quartiles** ([`quartile::QuartileTracker`]): keep the best and
//!    worst scoring students in bounded buckets
//! 4. **Discriminate** ([`discrimination::DiscriminationCalculator`]): compare
//!    how often each question is answered correctly in both quartiles
//! 5. **Assemble** ([`report::ReportAssembler`]): emit the ordered rows
//!
//! Display text lives in [`labels`]; every cell carries either a label or a
//! raw value, and number formatting is left to the serializer.
//!
//! # Examples
//!
//! ```
//! use itemstat_analysis::{input::ReportInput, labels::Locale, report::ReportAssembler};
//!
//! let input: ReportInput = serde_json::from_str(
//!     r#"{
//!       "students": [{"username": "ana", "email": "ana@example.org"}],
//!       "states": [{"username": "ana", "state": {
//!         "attempts": 1,
//!         "score": {"raw_earned": 1, "raw_possible": 1},
//!         "input_state": {"q_1": {}}
//!       }}],
//!       "answers": [{"username": "ana", "answers": [{
//!         "answer_id": "q_1", "question_text": "2 + 2?",
//!         "answer_text": "4", "correct_answer_text": "4"
//!       }]}]
//!     }"#,
//! )?;
//! let report = ReportAssembler::assemble(&input, Locale::En)?;
//! assert_eq!(report.summary.answered, 1);
//! assert_eq!(report.summary.mean, 1.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod catalog;
pub mod discrimination;
pub mod error;
pub mod input;
pub mod labels;
pub mod normalize;
pub mod quartile;
pub mod report;
