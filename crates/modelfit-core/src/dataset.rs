use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Splits a single CSV line into trimmed cell values.
///
/// Both the profiler and the synthesizer tokenize through this trait so a
/// quoted field is read the same way everywhere.
pub trait RowParser {
    fn parse_row(&self, line: &str) -> Vec<String>;
}

/// Quote-aware row parser backed by the `csv` reader.
///
/// Commas inside double quotes are not separators, surrounding quotes are
/// stripped and `""` inside a quoted field decodes to a literal quote.
/// Fields never span lines: callers split the input on newlines first.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotedRowParser;

impl RowParser for QuotedRowParser {
    fn parse_row(&self, line: &str) -> Vec<String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(line.as_bytes());

        let mut record = csv::StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => record.iter().map(|field| field.to_string()).collect(),
            // Invalid UTF-8 cannot occur for &str input, so this only covers
            // an empty line.
            _ => vec![String::new()],
        }
    }
}

/// Iterate the non-blank lines of a CSV document (`\r\n` tolerated).
pub fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

/// Parsed tabular dataset: ordered header plus rows of equal width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows discarded because their cell count differed from the header's.
    pub dropped_rows: usize,
}

impl Dataset {
    /// Parse CSV text, keeping only rows whose width matches the header.
    pub fn parse(text: &str, parser: &dyn RowParser) -> Result<Self> {
        let mut lines = non_blank_lines(text);
        let header = lines.next().ok_or(Error::EmptyDataset)?;
        let columns = parser.parse_row(header);

        let mut rows = Vec::new();
        let mut dropped_rows = 0usize;
        for line in lines {
            let cells = parser.parse_row(line);
            if cells.len() == columns.len() {
                rows.push(cells);
            } else {
                dropped_rows += 1;
            }
        }

        Ok(Self {
            columns,
            rows,
            dropped_rows,
        })
    }

    /// Parse only the header line.
    pub fn header(text: &str, parser: &dyn RowParser) -> Result<Vec<String>> {
        non_blank_lines(text)
            .next()
            .map(|line| parser.parse_row(line))
            .ok_or(Error::EmptyDataset)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate the raw cells of one column, in row order.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_commas_are_not_separators() {
        let cells = QuotedRowParser.parse_row(r#"1,"Smith, John", x "#);
        assert_eq!(cells, vec!["1", "Smith, John", "x"]);
    }

    #[test]
    fn doubled_quotes_decode_to_literal_quote() {
        let cells = QuotedRowParser.parse_row(r#""say ""hi""",2"#);
        assert_eq!(cells, vec![r#"say "hi""#, "2"]);
    }

    #[test]
    fn trailing_comma_yields_empty_cell() {
        let cells = QuotedRowParser.parse_row("a,b,");
        assert_eq!(cells, vec!["a", "b", ""]);
    }

    #[test]
    fn drops_rows_with_wrong_width() {
        let text = "a,b\n1,2\n\n3\n4,5,6\r\n7,8\n";
        let dataset = Dataset::parse(text, &QuotedRowParser).unwrap();
        assert_eq!(dataset.columns, vec!["a", "b"]);
        assert_eq!(dataset.rows, vec![vec!["1", "2"], vec!["7", "8"]]);
        assert_eq!(dataset.dropped_rows, 2);
    }

    #[test]
    fn blank_input_is_empty_dataset() {
        let err = Dataset::parse("\n  \n", &QuotedRowParser).unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
    }
}
