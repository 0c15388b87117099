//! Quartile-based discrimination index
//!
//! For a question `id`, with `Q` students in each of the top and bottom
//! quartiles:
//!
//! ```text
//! d(id) = (correct among best Q - correct among worst Q) / Q
//! ```
//!
//! The trackers are sized against a provisional quartile computed before the
//! pass (from every user with rendered answers). Once the pass is complete the
//! true quartile `floor(answered / 4)` is known, and surplus entries are
//! trimmed from the least favorable end of each tracker.

use itemstat_stats::tally::Tally;

use crate::{error::AnalysisError, labels::Locale, quartile::QuartileTracker};

/// Qualitative reading of a discrimination index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscriminationBand {
    /// `d` in `[0.4, 1)`
    Excellent,
    /// `d` in `(0, 0.4)`
    Moderate,
    /// `d` is exactly `0` or `1`
    NoDiscrimination,
    /// `d` in `[-1, 0)`
    Revise,
    /// Quartile is empty, no index can be computed
    Undefined,
}

impl DiscriminationBand {
    /// Classifies an index value; `None` if it lies outside `[-1, 1]`.
    #[must_use]
    pub fn classify(value: f64) -> Option<Self> {
        if value == 0.0 || value == 1.0 {
            Some(Self::NoDiscrimination)
        } else if (0.4..1.0).contains(&value) {
            Some(Self::Excellent)
        } else if value > 0.0 && value < 0.4 {
            Some(Self::Moderate)
        } else if (-1.0..0.0).contains(&value) {
            Some(Self::Revise)
        } else {
            None
        }
    }

    #[must_use]
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::Excellent) => "Excellent discrimination",
            (Locale::En, Self::Moderate) => "Moderately discriminating",
            (Locale::En, Self::NoDiscrimination) => "No discrimination",
            (Locale::En, Self::Revise) => "Item should be revised",
            (Locale::En, Self::Undefined) => "Undefined",
            (Locale::Es, Self::Excellent) => "Excelente discriminación",
            (Locale::Es, Self::Moderate) => "Medianamente discriminador",
            (Locale::Es, Self::NoDiscrimination) => "Nula discriminación",
            (Locale::Es, Self::Revise) => "Ítem a modificar",
            (Locale::Es, Self::Undefined) => "Indefinido",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscriminationIndex {
    /// `None` when the quartile is empty
    pub value: Option<f64>,
    pub band: DiscriminationBand,
}

/// Per-question correct counts of the reconciled top and bottom quartiles.
#[derive(Debug, Clone)]
pub struct DiscriminationCalculator {
    true_quartile: usize,
    best: Tally<String>,
    worst: Tally<String>,
}

impl DiscriminationCalculator {
    /// Reconciles both trackers to `floor(answered / 4)` entries and counts
    /// the correct answers retained in each.
    #[must_use]
    pub fn reconcile(
        mut best: QuartileTracker,
        mut worst: QuartileTracker,
        provisional_quartile: usize,
        answered: usize,
    ) -> Self {
        let true_quartile = answered / 4;
        if provisional_quartile != true_quartile {
            let trimmed_best = best.trim_to(true_quartile);
            let trimmed_worst = worst.trim_to(true_quartile);
            tracing::warn!(
                provisional_quartile,
                true_quartile,
                trimmed_best,
                trimmed_worst,
                "quartile size corrected after pass"
            );
        }
        Self {
            true_quartile,
            best: best.correct_counts(),
            worst: worst.correct_counts(),
        }
    }

    #[must_use]
    pub fn true_quartile(&self) -> usize {
        self.true_quartile
    }

    #[must_use]
    pub fn best_count(&self, answer_id: &str) -> usize {
        self.best.get(answer_id)
    }

    #[must_use]
    pub fn worst_count(&self, answer_id: &str) -> usize {
        self.worst.get(answer_id)
    }

    /// Discrimination index of one question.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::DataConsistency`] when the index falls outside
    /// `[-1, 1]`, which only happens if the trackers were fed inconsistent data.
    #[expect(clippy::cast_precision_loss)]
    pub fn index(&self, answer_id: &str) -> Result<DiscriminationIndex, AnalysisError> {
        if self.true_quartile == 0 {
            return Ok(DiscriminationIndex {
                value: None,
                band: DiscriminationBand::Undefined,
            });
        }
        let value = (self.best_count(answer_id) as f64 - self.worst_count(answer_id) as f64)
            / self.true_quartile as f64;
        let band =
            DiscriminationBand::classify(value).ok_or_else(|| AnalysisError::DataConsistency {
                answer_id: answer_id.to_owned(),
                value,
            })?;
        Ok(DiscriminationIndex {
            value: Some(value),
            band,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalize::StudentAnalyticsFragment, quartile::QuartileTracker};

    fn fragment(score: f64, ids: &[&str]) -> StudentAnalyticsFragment {
        StudentAnalyticsFragment {
            score,
            correct_ids: ids.iter().map(|s| (*s).to_owned()).collect(),
            incorrect_ids: vec![],
        }
    }

    fn trackers(
        entries: &[(f64, Vec<&str>)],
        target: usize,
    ) -> (QuartileTracker, QuartileTracker) {
        let mut best = QuartileTracker::best();
        let mut worst = QuartileTracker::worst();
        for (score, ids) in entries {
            let fragment = fragment(*score, ids);
            best.offer(&fragment, target);
            worst.offer(&fragment, target);
        }
        (best, worst)
    }

    /// 63 respondents. Best quartile: fifteen perfect students. Worst
    /// quartile: two perfect students, eleven at 0.75, one at 0.5 and one
    /// at 0.25.
    fn cohort_entries() -> Vec<(f64, Vec<&'static str>)> {
        let mut entries = vec![(0.75, vec!["b", "c", "d"])];
        entries.extend(std::iter::repeat_n((0.75, vec!["a", "b", "c"]), 10));
        entries.push((0.5, vec!["b", "c"]));
        entries.push((0.25, vec!["c"]));
        entries.extend(std::iter::repeat_n((1.0, vec!["a", "b", "c", "d"]), 50));
        entries
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(DiscriminationBand::classify(1.0), Some(DiscriminationBand::NoDiscrimination));
        assert_eq!(DiscriminationBand::classify(0.0), Some(DiscriminationBand::NoDiscrimination));
        assert_eq!(DiscriminationBand::classify(0.4), Some(DiscriminationBand::Excellent));
        assert_eq!(DiscriminationBand::classify(0.99), Some(DiscriminationBand::Excellent));
        assert_eq!(DiscriminationBand::classify(0.39), Some(DiscriminationBand::Moderate));
        assert_eq!(DiscriminationBand::classify(-1.0), Some(DiscriminationBand::Revise));
        assert_eq!(DiscriminationBand::classify(-0.01), Some(DiscriminationBand::Revise));
        assert_eq!(DiscriminationBand::classify(1.01), None);
        assert_eq!(DiscriminationBand::classify(-1.5), None);
        assert_eq!(DiscriminationBand::classify(f64::NAN), None);
    }

    #[test]
    fn test_cohort_index() {
        let entries = cohort_entries();
        assert_eq!(entries.len(), 63);
        let (best, worst) = trackers(&entries, 15);
        let calc = DiscriminationCalculator::reconcile(best, worst, 15, 63);

        assert_eq!(calc.true_quartile(), 15);
        assert_eq!(calc.best_count("a"), 15);
        assert_eq!(calc.worst_count("a"), 12);
        assert_eq!(calc.worst_count("b"), 14);
        assert_eq!(calc.worst_count("c"), 15);
        assert_eq!(calc.worst_count("d"), 3);

        let d = calc.index("d").unwrap();
        assert_eq!(d.value, Some(12.0 / 15.0));
        assert_eq!(d.band, DiscriminationBand::Excellent);
        let a = calc.index("a").unwrap();
        assert_eq!(a.value, Some(3.0 / 15.0));
        assert_eq!(a.band, DiscriminationBand::Moderate);
        let c = calc.index("c").unwrap();
        assert_eq!(c.value, Some(0.0));
        assert_eq!(c.band, DiscriminationBand::NoDiscrimination);
    }

    #[test]
    fn test_oversized_provisional_quartile_is_trimmed() {
        // 75 users rendered answers, but only 63 are enrolled respondents
        let entries = cohort_entries();
        let (best, worst) = trackers(&entries, 18);
        assert_eq!(best.len(), 18);
        let calc = DiscriminationCalculator::reconcile(best, worst, 18, 63);

        assert_eq!(calc.true_quartile(), 15);
        assert_eq!(calc.best_count("a"), 15);
        assert_eq!(calc.worst_count("a"), 12);
        assert_eq!(calc.worst_count("b"), 14);
        assert_eq!(calc.worst_count("c"), 15);
        assert_eq!(calc.worst_count("d"), 3);
    }

    #[test]
    fn test_order_does_not_change_index() {
        let entries = vec![
            (0.1, vec!["q1"]),
            (0.9, vec!["q1", "q2", "q3"]),
            (0.4, vec!["q2"]),
            (0.7, vec!["q1", "q3"]),
            (0.2, vec![]),
            (0.6, vec!["q3"]),
            (0.3, vec!["q2", "q3"]),
            (0.8, vec!["q1", "q2"]),
        ];
        let mut reversed = entries.clone();
        reversed.reverse();
        let mut rotated = entries.clone();
        rotated.rotate_left(3);

        let indices = [entries, reversed, rotated].map(|entries| {
            let (best, worst) = trackers(&entries, 2);
            let calc = DiscriminationCalculator::reconcile(best, worst, 2, 8);
            ["q1", "q2", "q3"].map(|id| calc.index(id).unwrap())
        });
        assert_eq!(indices[0], indices[1]);
        assert_eq!(indices[0], indices[2]);
        assert_eq!(indices[0][0].value, Some(0.5));
    }

    #[test]
    fn test_order_does_not_change_index_with_tied_scores() {
        // Students with the same score answered the same questions, so every
        // tied entry a tracker keeps contributes the same ids.
        let mut entries = vec![(0.25, vec!["c"]), (0.5, vec!["b", "c"])];
        entries.extend(std::iter::repeat_n((0.75, vec!["a", "b", "c"]), 11));
        entries.extend(std::iter::repeat_n((1.0, vec!["a", "b", "c", "d"]), 50));
        assert_eq!(entries.len(), 63);

        let mut reversed = entries.clone();
        reversed.reverse();
        let mut rotated = entries.clone();
        rotated.rotate_left(40);
        // 10 is coprime with 63, so this visits every entry once
        let strided: Vec<_> = (0..entries.len())
            .map(|i| entries[i * 10 % entries.len()].clone())
            .collect();

        for target in [15, 18] {
            let results = [&entries, &reversed, &rotated, &strided].map(|entries| {
                let (best, worst) = trackers(entries, target);
                let calc = DiscriminationCalculator::reconcile(best, worst, target, 63);
                ["a", "b", "c", "d"].map(|id| {
                    (
                        calc.best_count(id),
                        calc.worst_count(id),
                        calc.index(id).unwrap(),
                    )
                })
            });
            for other in &results[1..] {
                assert_eq!(&results[0], other);
            }

            let [a, b, c, d] = &results[0];
            assert_eq!((a.0, a.1), (15, 13));
            assert_eq!((b.0, b.1), (15, 14));
            assert_eq!((c.0, c.1), (15, 15));
            assert_eq!((d.0, d.1), (15, 2));
            assert_eq!(a.2.value, Some(2.0 / 15.0));
            assert_eq!(d.2.value, Some(13.0 / 15.0));
            assert_eq!(d.2.band, DiscriminationBand::Excellent);
        }
    }

    #[test]
    fn test_uniform_answers_do_not_discriminate() {
        let entries = vec![(1.0, vec!["q1", "q2"]); 12];
        let (best, worst) = trackers(&entries, 3);
        let calc = DiscriminationCalculator::reconcile(best, worst, 3, 12);
        for id in ["q1", "q2"] {
            let index = calc.index(id).unwrap();
            assert_eq!(index.value, Some(0.0));
            assert_eq!(index.band, DiscriminationBand::NoDiscrimination);
        }
    }

    #[test]
    fn test_no_respondents_is_undefined() {
        let calc = DiscriminationCalculator::reconcile(
            QuartileTracker::best(),
            QuartileTracker::worst(),
            0,
            0,
        );
        let index = calc.index("q1").unwrap();
        assert_eq!(index.value, None);
        assert_eq!(index.band, DiscriminationBand::Undefined);
    }

    #[test]
    fn test_too_few_respondents_is_undefined() {
        let (best, worst) = trackers(&[(1.0, vec!["q1"]), (0.0, vec![])], 1);
        let calc = DiscriminationCalculator::reconcile(best, worst, 1, 3);
        assert_eq!(calc.true_quartile(), 0);
        assert_eq!(calc.best_count("q1"), 0);
        assert_eq!(calc.index("q1").unwrap().band, DiscriminationBand::Undefined);
    }
}
