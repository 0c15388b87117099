//! Input data consumed by the report engine
//!
//! The engine does not talk to a course platform. Everything it needs is
//! handed over in one [`ReportInput`] document, produced upstream by the
//! enrollment store, the problem-state store and the problem renderer.
//!
//! # Data Structure
//!
//! ```text
//! ReportInput
//! ├─ students: Vec<Student>           enrolled students, report order
//! ├─ states: Vec<StudentState>        persisted problem state per user
//! │   └─ state: RawState
//! │       ├─ attempts (absent => never submitted)
//! │       ├─ score { raw_earned, raw_possible }
//! │       └─ input_state { answer_id => .. }   defines column order
//! └─ answers: Vec<StudentAnswers>     rendered answers per user
//!     └─ answers: Vec<AnswerRecord>
//! ```
//!
//! # Serialization
//!
//! ```json
//! {
//!   "students": [{ "username": "ana", "email": "ana@example.org", "external_id": "17" }],
//!   "states": [{
//!     "username": "ana",
//!     "state": {
//!       "attempts": 1,
//!       "score": { "raw_earned": 2, "raw_possible": 3 },
//!       "input_state": { "p_2_1": {}, "p_3_1": {} }
//!     }
//!   }],
//!   "answers": [{
//!     "username": "ana",
//!     "answers": [
//!       { "answer_id": "p_2_1", "question_text": "2 + 2?", "answer_text": "4", "correct_answer_text": "4" }
//!     ]
//!   }]
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Complete input of one report run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportInput {
    /// Enrolled students
    pub students: Vec<Student>,
    /// Problem state of every user that opened the problem, enrolled or not
    #[serde(default)]
    pub states: Vec<StudentState>,
    /// Rendered answers of every user that submitted answers
    #[serde(default)]
    pub answers: Vec<StudentAnswers>,
}

impl ReportInput {
    /// Indexes enrolled students by username.
    #[must_use]
    pub fn enrolled(&self) -> HashMap<&str, &Student> {
        self.students
            .iter()
            .map(|s| (s.username.as_str(), s))
            .collect()
    }

    /// Indexes answer records by username.
    #[must_use]
    pub fn answers_by_user(&self) -> HashMap<&str, &[AnswerRecord]> {
        self.answers
            .iter()
            .map(|a| (a.username.as_str(), a.answers.as_slice()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    pub username: String,
    pub email: String,
    /// Identifier in the institution's own records; may be empty
    #[serde(default)]
    pub external_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudentState {
    pub username: String,
    pub state: RawState,
}

/// Persisted problem state of a single user.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawState {
    /// Number of submissions; absent when the user never submitted
    #[serde(default)]
    pub attempts: Option<u64>,
    #[serde(default)]
    pub score: Option<RawScore>,
    /// Per-input state keyed by answer id, in document order
    #[serde(default)]
    pub input_state: serde_json::Map<String, serde_json::Value>,
}

impl RawState {
    /// Answer ids of this state, in column order.
    pub fn answer_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.input_state.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct RawScore {
    pub raw_earned: f64,
    pub raw_possible: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudentAnswers {
    pub username: String,
    pub answers: Vec<AnswerRecord>,
}

/// One answered input of one student, as rendered by the problem engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerRecord {
    pub answer_id: String,
    pub question_text: String,
    pub answer_text: String,
    /// Absent when the input has no canonical answer (free text, ungraded)
    #[serde(default)]
    pub correct_answer_text: Option<String>,
}

/// Fields of an [`AnswerRecord`].
///
/// Record fields are addressed through this enum, never through display
/// strings, so a translated label can not break a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerField {
    AnswerId,
    Question,
    Answer,
    CorrectAnswer,
}

impl AnswerRecord {
    #[must_use]
    pub fn field(&self, field: AnswerField) -> Option<&str> {
        match field {
            AnswerField::AnswerId => Some(&self.answer_id),
            AnswerField::Question => Some(&self.question_text),
            AnswerField::Answer => Some(&self.answer_text),
            AnswerField::CorrectAnswer => self.correct_answer_text.as_deref(),
        }
    }

    /// Whether the given answer matches the canonical answer.
    ///
    /// Inputs without a canonical answer are never correct.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct_answer_text
            .as_deref()
            .is_some_and(|correct| correct == self.answer_text)
    }
}
