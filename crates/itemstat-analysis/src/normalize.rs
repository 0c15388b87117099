//! Per-student row normalization
//!
//! Turns one student's raw problem state and rendered answers into a
//! [`DetailRow`] shaped against the report's fixed question columns, plus the
//! [`StudentAnalyticsFragment`] that feeds the aggregate statistics.

use std::collections::HashMap;

use itemstat_stats::ratio::safe_div;

use crate::{
    error::AnalysisError,
    input::{AnswerRecord, RawState, Student},
};

/// Derived analytics of one student who submitted at least once.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAnalyticsFragment {
    /// `raw_earned / raw_possible`, `0.0` when nothing was possible
    pub score: f64,
    /// Answer ids answered correctly, in record order
    pub correct_ids: Vec<String>,
    /// Answer ids answered incorrectly, in record order
    pub incorrect_ids: Vec<String>,
}

impl StudentAnalyticsFragment {
    /// Classifies every record as correct or incorrect.
    #[must_use]
    pub fn from_records(score: f64, records: &[AnswerRecord]) -> Self {
        let (correct, incorrect): (Vec<_>, Vec<_>) =
            records.iter().partition(|record| record.is_correct());
        Self {
            score,
            correct_ids: correct.into_iter().map(|r| r.answer_id.clone()).collect(),
            incorrect_ids: incorrect.into_iter().map(|r| r.answer_id.clone()).collect(),
        }
    }
}

/// One detail line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub username: String,
    pub email: String,
    pub external_id: String,
    pub attempts: u64,
    /// Answer text per question column
    pub answers: Vec<String>,
    pub raw_earned: f64,
    pub raw_possible: f64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedResponse {
    pub row: DetailRow,
    pub fragment: StudentAnalyticsFragment,
}

/// Normalizes one student's response.
///
/// Returns `Ok(None)` when the state carries no `attempts` field: the student
/// never submitted and counts as not answered.
///
/// # Errors
///
/// Returns [`AnalysisError::IncompleteAnswerSet`] when a question column has no
/// matching record for this student.
pub fn normalize_student(
    student: &Student,
    state: &RawState,
    records: &[AnswerRecord],
    question_ids: &[String],
) -> Result<Option<NormalizedResponse>, AnalysisError> {
    let Some(attempts) = state.attempts else {
        tracing::debug!(username = %student.username, "no attempts recorded, skipping");
        return Ok(None);
    };

    let answer_by_id = records
        .iter()
        .map(|r| (r.answer_id.as_str(), r.answer_text.as_str()))
        .collect::<HashMap<_, _>>();
    let answers = question_ids
        .iter()
        .map(|id| {
            answer_by_id
                .get(id.as_str())
                .map(|text| (*text).to_owned())
                .ok_or_else(|| AnalysisError::IncompleteAnswerSet {
                    username: student.username.clone(),
                    answer_id: id.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let raw = state.score.unwrap_or_default();
    let score = safe_div(raw.raw_earned, raw.raw_possible);
    if raw.raw_possible == 0.0 {
        tracing::debug!(username = %student.username, "raw_possible is zero, score set to 0");
    }

    let row = DetailRow {
        username: student.username.clone(),
        email: student.email.clone(),
        external_id: student.external_id.clone(),
        attempts,
        answers,
        raw_earned: raw.raw_earned,
        raw_possible: raw.raw_possible,
        score,
    };
    let fragment = StudentAnalyticsFragment::from_records(score, records);

    Ok(Some(NormalizedResponse { row, fragment }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawScore;

    fn student() -> Student {
        Student {
            username: "ana".into(),
            email: "ana@example.org".into(),
            external_id: "17".into(),
        }
    }

    fn record(id: &str, answer: &str, correct: Option<&str>) -> AnswerRecord {
        AnswerRecord {
            answer_id: id.into(),
            question_text: format!("question {id}"),
            answer_text: answer.into(),
            correct_answer_text: correct.map(Into::into),
        }
    }

    fn state(attempts: Option<u64>, earned: f64, possible: f64) -> RawState {
        RawState {
            attempts,
            score: Some(RawScore {
                raw_earned: earned,
                raw_possible: possible,
            }),
            input_state: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_row_follows_question_order() {
        let records = [
            record("q2", "blue", Some("red")),
            record("q1", "4", Some("4")),
        ];
        let ids = vec!["q1".to_owned(), "q2".to_owned()];
        let response = normalize_student(&student(), &state(Some(2), 2.0, 3.0), &records, &ids)
            .unwrap()
            .unwrap();

        assert_eq!(response.row.answers, ["4", "blue"]);
        assert_eq!(response.row.attempts, 2);
        assert_eq!(response.row.raw_earned, 2.0);
        assert_eq!(response.row.raw_possible, 3.0);
        assert!((response.row.score - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(response.fragment.correct_ids, ["q1"]);
        assert_eq!(response.fragment.incorrect_ids, ["q2"]);
    }

    #[test]
    fn test_missing_attempts_is_not_answered() {
        let records = [record("q1", "4", Some("4"))];
        let ids = vec!["q1".to_owned()];
        let response = normalize_student(&student(), &state(None, 1.0, 1.0), &records, &ids);
        assert!(response.unwrap().is_none());
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let records = [record("q1", "4", Some("4"))];
        let ids = vec!["q1".to_owned(), "q9".to_owned()];
        let err = normalize_student(&student(), &state(Some(1), 1.0, 1.0), &records, &ids)
            .unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::IncompleteAnswerSet { ref username, ref answer_id }
                if username == "ana" && answer_id == "q9"
        ));
    }

    #[test]
    fn test_zero_possible_points_scores_zero() {
        let records = [record("q1", "x", None)];
        let ids = vec!["q1".to_owned()];
        let response = normalize_student(&student(), &state(Some(1), 0.0, 0.0), &records, &ids)
            .unwrap()
            .unwrap();
        assert_eq!(response.fragment.score, 0.0);
        assert!(response.fragment.correct_ids.is_empty());
        assert_eq!(response.fragment.incorrect_ids, ["q1"]);
    }
}
