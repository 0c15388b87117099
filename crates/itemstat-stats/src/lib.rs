//! Statistical utilities for item analysis reports.
//!
//! - **Descriptive statistics**: mean and population standard deviation
//! - **Tallies**: frequency counting with deterministic first-seen ordering
//! - **Ratios**: division helpers that resolve a zero denominator to `0`
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing score sets
//! - [`tally`]: Ordered frequency counters
//! - [`ratio`]: Zero-safe ratios
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use itemstat_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 0.5, 0.75, 1.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 0.8125);
//! ```
//!
//! ## Counting occurrences
//!
//! ```
//! use itemstat_stats::tally::Tally;
//!
//! let tally = ["q1", "q2", "q1"].into_iter().collect::<Tally<_>>();
//! assert_eq!(tally.get(&"q1"), 2);
//! ```

pub mod descriptive;
pub mod ratio;
pub mod tally;
