//! Cohort-level statistics accumulated in one streaming pass
//!
//! Every student fragment is folded into answered counts, the score list and
//! the per-question correct/incorrect tallies. Tallies keep first-seen order
//! so that ties between equally easy (or hard) questions are listed
//! deterministically.

use itemstat_stats::{descriptive::DescriptiveStats, ratio::rate, tally::Tally};

use crate::{labels::Locale, normalize::StudentAnalyticsFragment};

/// Difficulty reading of the share of respondents answering correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyBand {
    /// `[0.8, 1]`
    VeryEasy,
    /// `[0.65, 0.8)`
    RelativelyEasy,
    /// `[0.5, 0.65)`
    Adequate,
    /// `[0.3, 0.5)`
    RelativelyHard,
    /// `[0.1, 0.3)`
    Hard,
    /// `[0, 0.1)`
    VeryHard,
}

impl DifficultyBand {
    #[must_use]
    pub fn classify(pct_correct: f64) -> Self {
        match pct_correct {
            p if p >= 0.8 => Self::VeryEasy,
            p if p >= 0.65 => Self::RelativelyEasy,
            p if p >= 0.5 => Self::Adequate,
            p if p >= 0.3 => Self::RelativelyHard,
            p if p >= 0.1 => Self::Hard,
            _ => Self::VeryHard,
        }
    }

    #[must_use]
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::VeryEasy) => "Very easy",
            (Locale::En, Self::RelativelyEasy) => "Relatively easy",
            (Locale::En, Self::Adequate) => "Adequate difficulty",
            (Locale::En, Self::RelativelyHard) => "Relatively hard",
            (Locale::En, Self::Hard) => "Hard",
            (Locale::En, Self::VeryHard) => "Very hard",
            (Locale::Es, Self::VeryEasy) => "Muy fácil",
            (Locale::Es, Self::RelativelyEasy) => "Relativamente fácil",
            (Locale::Es, Self::Adequate) => "Dificultad adecuada",
            (Locale::Es, Self::RelativelyHard) => "Relativamente dificil",
            (Locale::Es, Self::Hard) => "Dificil",
            (Locale::Es, Self::VeryHard) => "Muy dificil",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionDifficulty {
    pub pct_correct: f64,
    pub pct_incorrect: f64,
    pub band: DifficultyBand,
}

/// Questions tied at the top of one tally.
///
/// `complement_*` describe the *first* id of the tie only: the incorrect
/// figures for the easiest group, the correct figures for the hardest group.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionExtremes {
    pub ids: Vec<String>,
    pub count: usize,
    pub pct: f64,
    pub complement_count: usize,
    pub complement_pct: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AggregateStatistics {
    answered: usize,
    scores: Vec<f64>,
    correct: Tally<String>,
    incorrect: Tally<String>,
}

impl AggregateStatistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one respondent into the statistics.
    pub fn record(&mut self, fragment: &StudentAnalyticsFragment) {
        self.answered += 1;
        self.scores.push(fragment.score);
        for id in &fragment.correct_ids {
            self.correct.add(id.clone());
        }
        for id in &fragment.incorrect_ids {
            self.incorrect.add(id.clone());
        }
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.answered
    }

    #[must_use]
    pub fn not_answered(&self, total_enrolled: usize) -> usize {
        total_enrolled.saturating_sub(self.answered)
    }

    #[must_use]
    pub fn answered_rate(&self, total_enrolled: usize) -> f64 {
        rate(self.answered, total_enrolled)
    }

    #[must_use]
    pub fn not_answered_rate(&self, total_enrolled: usize) -> f64 {
        rate(self.not_answered(total_enrolled), total_enrolled)
    }

    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    #[must_use]
    pub fn descriptive(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.scores.iter().copied())
    }

    /// Mean score, `0.0` when nobody answered.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.descriptive().map_or(0.0, |s| s.mean)
    }

    /// Population standard deviation, `None` when nobody answered.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        self.descriptive().map(|s| s.std_dev)
    }

    #[must_use]
    pub fn correct_count(&self, answer_id: &str) -> usize {
        self.correct.get(answer_id)
    }

    #[must_use]
    pub fn incorrect_count(&self, answer_id: &str) -> usize {
        self.incorrect.get(answer_id)
    }

    /// Questions with the most correct answers.
    #[must_use]
    pub fn easiest(&self) -> QuestionExtremes {
        Self::extremes(&self.correct, &self.incorrect, self.answered)
    }

    /// Questions with the most incorrect answers.
    #[must_use]
    pub fn hardest(&self) -> QuestionExtremes {
        Self::extremes(&self.incorrect, &self.correct, self.answered)
    }

    fn extremes(
        tally: &Tally<String>,
        complement: &Tally<String>,
        answered: usize,
    ) -> QuestionExtremes {
        let (ids, count) = tally.max_keys();
        let complement_count = ids.first().map_or(0, |id| complement.get(id.as_str()));
        QuestionExtremes {
            ids: ids.into_iter().cloned().collect(),
            count,
            pct: rate(count, answered),
            complement_count,
            complement_pct: rate(complement_count, answered),
        }
    }

    /// Difficulty of one question relative to all respondents.
    #[must_use]
    pub fn difficulty(&self, answer_id: &str) -> QuestionDifficulty {
        let pct_correct = rate(self.correct_count(answer_id), self.answered);
        QuestionDifficulty {
            pct_correct,
            pct_incorrect: rate(self.incorrect_count(answer_id), self.answered),
            band: DifficultyBand::classify(pct_correct),
        }
    }
}
