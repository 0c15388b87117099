//! Report configuration
//!
//! Values come from an optional JSON file and are then overridden by
//! command-line flags. Fields missing from the file keep their defaults.
//!
//! ```json
//! {
//!   "delimiter": ";",
//!   "decimal_separator": ",",
//!   "locale": "es",
//!   "utf8_bom": true,
//!   "file_prefix": "item_analysis"
//! }
//! ```

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::Args;
use itemstat_analysis::labels::Locale;
use serde::{Deserialize, Serialize};

use crate::util;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub delimiter: char,
    pub decimal_separator: char,
    pub locale: Locale,
    /// Prefix the output with a UTF-8 byte-order mark
    pub utf8_bom: bool,
    /// File name prefix used with `--output-dir`
    pub file_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: '.',
            locale: Locale::En,
            utf8_bom: false,
            file_prefix: "item_analysis".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArg {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Decimal separator of number cells
    #[arg(long)]
    pub decimal_separator: Option<char>,

    /// Label language
    #[arg(long, value_enum, ignore_case = true)]
    pub locale: Option<Locale>,

    /// Prefix the output with a UTF-8 byte-order mark
    #[arg(long)]
    pub utf8_bom: bool,

    /// File name prefix used with `--output-dir`
    #[arg(long)]
    pub file_prefix: Option<String>,
}

impl ReportConfig {
    /// Loads the configuration file named by `arg`, if any, and applies the
    /// command-line overrides.
    pub fn load(arg: &ConfigArg) -> anyhow::Result<Self> {
        let base = match &arg.config {
            Some(path) => util::read_json_file("config", path)?,
            None => Self::default(),
        };
        let config = base.with_overrides(arg);
        config.validate()?;
        tracing::debug!(?config, "effective configuration");
        Ok(config)
    }

    #[must_use]
    fn with_overrides(mut self, arg: &ConfigArg) -> Self {
        if let Some(delimiter) = arg.delimiter {
            self.delimiter = delimiter;
        }
        if let Some(separator) = arg.decimal_separator {
            self.decimal_separator = separator;
        }
        if let Some(locale) = arg.locale {
            self.locale = locale;
        }
        if arg.utf8_bom {
            self.utf8_bom = true;
        }
        if let Some(prefix) = &arg.file_prefix {
            self.file_prefix.clone_from(prefix);
        }
        self
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.delimiter != self.decimal_separator,
            "Delimiter and decimal separator must differ (both are '{}')",
            self.delimiter
        );
        anyhow::ensure!(
            self.delimiter.is_ascii(),
            "Delimiter must be an ASCII character: '{}'",
            self.delimiter
        );
        anyhow::ensure!(
            !matches!(self.delimiter, '"' | '\n' | '\r'),
            "Delimiter can not be a quote or a line break"
        );
        anyhow::ensure!(
            !self.file_prefix.is_empty() && !self.file_prefix.contains(['/', '\\']),
            "File prefix must be a non-empty file name: '{}'",
            self.file_prefix
        );
        Ok(())
    }

    /// Report file name for a run started at `started_at`.
    #[must_use]
    pub fn file_name(&self, started_at: NaiveDateTime) -> String {
        format!(
            "{}_{}.csv",
            self.file_prefix,
            started_at.format("%Y-%m-%d-%H%M")
        )
    }
}
