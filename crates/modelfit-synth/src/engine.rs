use std::collections::HashSet;

use modelfit_core::{QuotedRowParser, RowParser, non_blank_lines};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::errors::SynthError;
use crate::heuristics::mock_value;
use crate::model::{SynthOptions, SynthesizedDataset};
use crate::output::csv::write_csv_string;

/// Appends fabricated columns to a truncated copy of a dataset.
#[derive(Debug, Clone, Default)]
pub struct MockColumnSynthesizer {
    options: SynthOptions,
}

impl MockColumnSynthesizer {
    pub fn new(options: SynthOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SynthOptions {
        &self.options
    }

    /// Synthesize `missing` columns using the configured seed, or fresh
    /// entropy when no seed is set.
    pub fn synthesize(&self, missing: &[String], text: &str) -> Result<SynthesizedDataset, SynthError> {
        match self.options.seed {
            Some(seed) => {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                self.synthesize_with_rng(missing, text, &mut rng)
            }
            None => {
                let mut rng = ChaCha8Rng::from_rng(&mut rand::rng());
                self.synthesize_with_rng(missing, text, &mut rng)
            }
        }
    }

    /// Synthesize with a caller-supplied RNG.
    ///
    /// Keeps the header and at most `sample_rows` data rows. Short rows are
    /// padded with empty cells up to the header width; requested columns the
    /// header already has are not added twice.
    pub fn synthesize_with_rng(
        &self,
        missing: &[String],
        text: &str,
        rng: &mut dyn RngCore,
    ) -> Result<SynthesizedDataset, SynthError> {
        let parser = QuotedRowParser;
        let mut lines = non_blank_lines(text);
        let header_line = lines.next().ok_or(SynthError::EmptyDataset)?;
        let mut columns = parser.parse_row(header_line);
        let width = columns.len();

        let mut seen: HashSet<String> = columns.iter().cloned().collect();
        let mut added_columns = Vec::new();
        for name in missing {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if seen.insert(name.to_string()) {
                added_columns.push(name.to_string());
            } else {
                debug!(column = %name, "column already present, not synthesized");
            }
        }

        let mut rows = Vec::new();
        for line in lines.take(self.options.sample_rows) {
            // Short rows are padded and wide rows cut so mock values land
            // under their own header.
            let mut cells = parser.parse_row(line);
            cells.resize(width, String::new());
            for column in &added_columns {
                cells.push(mock_value(column, rng));
            }
            rows.push(cells);
        }

        columns.extend(added_columns.iter().cloned());
        let text = write_csv_string(&columns, &rows)?;

        info!(
            added = ?added_columns,
            rows = rows.len(),
            seeded = self.options.seed.is_some(),
            "synthesized mock columns"
        );

        Ok(SynthesizedDataset {
            text,
            columns,
            added_columns,
            rows: rows.len(),
        })
    }
}
