//! Question catalog
//!
//! Maps every answer id to the question text and canonical answer shown in
//! the per-question table. The catalog is populated once, from the first
//! answer set in input order, and is frozen afterwards.
//!
//! Every student is expected to answer the same question set. Answer sets
//! that differ from the frozen catalog are reported by [`QuestionCatalog::validate`]
//! instead of being silently indexed past.

use std::collections::{BTreeSet, HashMap};

use crate::input::{AnswerField, AnswerRecord, StudentAnswers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub question_text: String,
    /// Canonical answer, empty when the input has none
    pub correct_answer_text: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    entries: HashMap<String, CatalogEntry>,
    /// Username whose answers populated the catalog
    source: Option<String>,
}

/// An answer set whose ids differ from the frozen catalog.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("answers of '{username}' differ from the question catalog (missing: {missing:?}, unexpected: {unexpected:?})")]
pub struct CatalogMismatch {
    pub username: String,
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl QuestionCatalog {
    /// Builds the catalog from the first non-empty answer set.
    #[must_use]
    pub fn from_answers(answers: &[StudentAnswers]) -> Self {
        let Some(first) = answers.iter().find(|a| !a.answers.is_empty()) else {
            return Self::default();
        };
        let entries = first
            .answers
            .iter()
            .map(|record| (record.answer_id.clone(), Self::entry_of(record)))
            .collect();
        Self {
            entries,
            source: Some(first.username.clone()),
        }
    }

    fn entry_of(record: &AnswerRecord) -> CatalogEntry {
        CatalogEntry {
            question_text: record
                .field(AnswerField::Question)
                .unwrap_or_default()
                .to_owned(),
            correct_answer_text: record
                .field(AnswerField::CorrectAnswer)
                .unwrap_or_default()
                .to_owned(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn get(&self, answer_id: &str) -> Option<&CatalogEntry> {
        self.entries.get(answer_id)
    }

    /// Compares every answer set except the one that populated the catalog.
    #[must_use]
    pub fn validate(&self, answers: &[StudentAnswers]) -> Vec<CatalogMismatch> {
        if self.is_empty() {
            return vec![];
        }
        let expected = self.entries.keys().map(String::as_str).collect::<BTreeSet<_>>();
        answers
            .iter()
            .filter(|a| self.source.as_deref() != Some(a.username.as_str()))
            .filter_map(|a| {
                let actual = a
                    .answers
                    .iter()
                    .map(|r| r.answer_id.as_str())
                    .collect::<BTreeSet<_>>();
                if actual == expected {
                    return None;
                }
                Some(CatalogMismatch {
                    username: a.username.clone(),
                    missing: expected.difference(&actual).map(|s| (*s).to_owned()).collect(),
                    unexpected: actual.difference(&expected).map(|s| (*s).to_owned()).collect(),
                })
            })
            .collect()
    }
}
