//! Delimited text serialization of report rows
//!
//! Rows go through a `csv` writer, which quotes text cells containing the
//! delimiter, a quote or a line break. Number cells are formatted here with
//! the configured decimal separator. An empty row becomes an empty line.

use std::borrow::Cow;

use anyhow::Context;
use itemstat_analysis::report::{Cell, Row};

use crate::config::ReportConfig;

const UTF8_BOM: &[u8] = "\u{feff}".as_bytes();

#[derive(Debug, Clone, Copy)]
pub struct DelimitedFormat {
    delimiter: u8,
    decimal_separator: char,
    utf8_bom: bool,
}

impl DelimitedFormat {
    pub fn from_config(config: &ReportConfig) -> anyhow::Result<Self> {
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("Delimiter must be an ASCII character: '{}'", config.delimiter))?;
        Ok(Self {
            delimiter,
            decimal_separator: config.decimal_separator,
            utf8_bom: config.utf8_bom,
        })
    }

    pub fn render(&self, rows: &[Row]) -> Result<Vec<u8>, csv::Error> {
        let mut out = Vec::new();
        if self.utf8_bom {
            out.extend_from_slice(UTF8_BOM);
        }
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(self.delimiter)
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'));

        for row in rows {
            // csv writes `""` for a record without fields
            if row.is_empty() {
                out.push(b'\n');
                continue;
            }
            let mut writer = builder.from_writer(&mut out);
            writer.write_record(row.iter().map(|cell| self.format_cell(cell).into_owned()))?;
            writer.flush()?;
        }
        Ok(out)
    }

    fn format_cell<'a>(&self, cell: &'a Cell) -> Cow<'a, str> {
        match cell {
            Cell::Text(text) => Cow::Borrowed(text),
            Cell::Integer(value) => Cow::Owned(value.to_string()),
            Cell::Number(value) => {
                let formatted = value.to_string();
                if self.decimal_separator == '.' {
                    Cow::Owned(formatted)
                } else {
                    Cow::Owned(formatted.replace('.', &self.decimal_separator.to_string()))
                }
            }
            Cell::Empty => Cow::Borrowed(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(delimiter: char, decimal_separator: char, utf8_bom: bool, rows: &[Row]) -> String {
        let format = DelimitedFormat::from_config(&ReportConfig {
            delimiter,
            decimal_separator,
            utf8_bom,
            ..ReportConfig::default()
        })
        .unwrap();
        String::from_utf8(format.render(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_cells_and_blank_rows() {
        let rows = vec![
            vec![
                Cell::from("Answered"),
                Cell::Integer(2),
                Cell::Number(0.5),
                Cell::Empty,
            ],
            vec![],
            vec![Cell::from("Mean"), Cell::Number(1.0)],
        ];
        assert_eq!(render(';', '.', false, &rows), "Answered;2;0.5;\n\nMean;1\n");
    }

    #[test]
    fn test_decimal_comma() {
        let rows = vec![vec![Cell::Number(2.0 / 3.0), Cell::Integer(10)]];
        assert_eq!(render(';', ',', false, &rows), "0,6666666666666666;10\n");
    }

    #[test]
    fn test_text_quoting() {
        let rows = vec![vec![
            Cell::from("a;b"),
            Cell::from("say \"hi\""),
            Cell::from("two\nlines"),
            Cell::from("a,b"),
        ]];
        assert_eq!(
            render(';', '.', false, &rows),
            "\"a;b\";\"say \"\"hi\"\"\";\"two\nlines\";a,b\n"
        );
    }

    #[test]
    fn test_rows_of_different_lengths() {
        let rows = vec![
            vec![Cell::from("Analytics")],
            vec![Cell::from("x"), Cell::from("y"), Cell::from("%")],
        ];
        assert_eq!(render(',', '.', false, &rows), "Analytics\nx,y,%\n");
    }

    #[test]
    fn test_byte_order_mark() {
        let rows = vec![vec![Cell::from("x")]];
        let text = render(';', '.', true, &rows);
        assert!(text.starts_with('\u{feff}'));
        assert_eq!(text.trim_start_matches('\u{feff}'), "x\n");
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let config = ReportConfig {
            delimiter: '¦',
            ..ReportConfig::default()
        };
        assert!(DelimitedFormat::from_config(&config).is_err());
    }
}
