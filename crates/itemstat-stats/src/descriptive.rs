/// Mean and spread of a dataset of scores.
///
/// The standard deviation is the *population* measure: squared deviations are
/// averaged over `n` rather than `n - 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The population standard deviation of the dataset.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from a set of values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use itemstat_stats::descriptive::DescriptiveStats;
    /// let values = [1.0, 2.0 / 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert!((stats.mean - 5.0 / 6.0).abs() < 1e-12);
    /// assert!((stats.std_dev - 1.0 / 6.0).abs() < 1e-12);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
