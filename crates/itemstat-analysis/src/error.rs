use crate::report::Phase;

/// Errors raised while building a report.
///
/// Recoverable conditions (a student without submissions, an empty question
/// catalog, zero denominators) never surface here; they degrade the report
/// instead.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("student '{username}' has no answer for question '{answer_id}'")]
    IncompleteAnswerSet { username: String, answer_id: String },
    #[display("discrimination index {value} of question '{answer_id}' is outside [-1, 1]")]
    DataConsistency { answer_id: String, value: f64 },
    #[display("report assembler is in phase {actual}, expected {expected}")]
    PhaseOrder { expected: Phase, actual: Phase },
}
