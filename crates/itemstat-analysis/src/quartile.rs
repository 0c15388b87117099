//! Bounded top/bottom quartile selection
//!
//! A [`QuartileTracker`] keeps the `Q` most extreme students seen so far:
//! the highest scores for [`Extreme::Best`], the lowest for [`Extreme::Worst`].
//! Only the `correct_ids` of each admitted student are retained.
//!
//! # Structure
//!
//! ```text
//! scores:  [0.25, 0.5, 0.75, 0.75, 1.0]       ascending, one entry per admission
//! buckets: 0.25 => [[..]]
//!          0.5  => [[..]]
//!          0.75 => [[..], [..]]              stack, last admitted on top
//!          1.0  => [[..]]
//! ```
//!
//! Eviction always happens at the least favorable score (lowest for best,
//! highest for worst) and pops the most recently admitted entry of that
//! score. A binary heap cannot express this tie rule, so a stack per score is
//! kept instead.

use std::{cmp::Ordering, collections::BTreeMap};

use itemstat_stats::tally::Tally;

use crate::normalize::StudentAnalyticsFragment;

/// Score with a total order, usable as a map key.
#[derive(Debug, Clone, Copy)]
pub struct Score(pub f64);

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Which end of the score distribution a tracker keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Best,
    Worst,
}

impl Extreme {
    /// Whether `candidate` should replace an entry at `boundary`.
    fn prefers(self, candidate: Score, boundary: Score) -> bool {
        match self {
            Extreme::Best => candidate > boundary,
            Extreme::Worst => candidate < boundary,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuartileTracker {
    extreme: Extreme,
    scores: Vec<Score>,
    buckets: BTreeMap<Score, Vec<Vec<String>>>,
}

impl QuartileTracker {
    #[must_use]
    pub fn new(extreme: Extreme) -> Self {
        Self {
            extreme,
            scores: vec![],
            buckets: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn best() -> Self {
        Self::new(Extreme::Best)
    }

    #[must_use]
    pub fn worst() -> Self {
        Self::new(Extreme::Worst)
    }

    #[must_use]
    pub fn extreme(&self) -> Extreme {
        self.extreme
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Admitted scores in ascending order.
    pub fn scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.iter().map(|s| s.0)
    }

    /// Retained `correct_ids` lists per score, each stack in admission order.
    pub fn buckets(&self) -> impl Iterator<Item = (f64, &[Vec<String>])> + '_ {
        self.buckets.iter().map(|(s, stack)| (s.0, stack.as_slice()))
    }

    /// Offers a student to the tracker, keeping at most `target_size` entries.
    ///
    /// Returns whether the student was admitted.
    pub fn offer(&mut self, fragment: &StudentAnalyticsFragment, target_size: usize) -> bool {
        let score = Score(fragment.score);
        if self.scores.len() < target_size {
            self.admit(score, fragment.correct_ids.clone());
            return true;
        }
        let Some(boundary) = self.boundary_index() else {
            return false;
        };
        let boundary_score = self.scores[boundary];
        if !self.extreme.prefers(score, boundary_score) {
            return false;
        }
        self.scores.remove(boundary);
        self.pop_bucket(boundary_score);
        self.admit(score, fragment.correct_ids.clone());
        true
    }

    /// Drops least favorable entries until at most `size` remain.
    ///
    /// Returns the number of entries removed.
    pub fn trim_to(&mut self, size: usize) -> usize {
        let excess = self.scores.len().saturating_sub(size);
        if excess == 0 {
            return 0;
        }
        let removed = match self.extreme {
            Extreme::Best => self.scores.drain(..excess).collect::<Vec<_>>(),
            Extreme::Worst => self.scores.drain(size..).collect::<Vec<_>>(),
        };
        for score in removed {
            self.pop_bucket(score);
        }
        excess
    }

    /// Counts how many retained students answered each id correctly.
    #[must_use]
    pub fn correct_counts(&self) -> Tally<String> {
        self.buckets
            .values()
            .flatten()
            .flatten()
            .cloned()
            .collect()
    }

    fn boundary_index(&self) -> Option<usize> {
        if self.scores.is_empty() {
            return None;
        }
        match self.extreme {
            Extreme::Best => Some(0),
            Extreme::Worst => Some(self.scores.len() - 1),
        }
    }

    fn admit(&mut self, score: Score, correct_ids: Vec<String>) {
        let pos = self.scores.partition_point(|s| *s <= score);
        self.scores.insert(pos, score);
        self.buckets.entry(score).or_default().push(correct_ids);
    }

    fn pop_bucket(&mut self, score: Score) {
        if let Some(stack) = self.buckets.get_mut(&score) {
            stack.pop();
            if stack.is_empty() {
                self.buckets.remove(&score);
            }
        }
    }
}
