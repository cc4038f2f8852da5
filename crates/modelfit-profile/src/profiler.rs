use std::collections::{HashMap, HashSet};

use modelfit_core::{Dataset, Error, QuotedRowParser, Result, RowParser};
use tracing::{debug, warn};

use crate::model::{
    CategoricalSummary, ColumnStatistic, ColumnSummary, DatasetProfile, FrequencyEntry,
    NumericalSummary, ProfileOptions, Quartiles,
};
use crate::stats::{
    bin_count, histogram, mean, parse_finite, population_std_dev, quartiles, round2,
};

/// Profile CSV text with default options.
pub fn profile(text: &str) -> Result<DatasetProfile> {
    ColumnProfiler::default().profile(text)
}

/// Classifies and summarizes every column of a dataset.
#[derive(Debug, Clone, Default)]
pub struct ColumnProfiler {
    options: ProfileOptions,
}

impl ColumnProfiler {
    pub fn new(options: ProfileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    /// Parse and profile CSV text.
    pub fn profile(&self, text: &str) -> Result<DatasetProfile> {
        self.profile_with(text, &QuotedRowParser)
    }

    pub fn profile_with(&self, text: &str, parser: &dyn RowParser) -> Result<DatasetProfile> {
        let dataset = Dataset::parse(text, parser)?;
        self.profile_dataset(&dataset)
    }

    /// Profile an already parsed dataset.
    pub fn profile_dataset(&self, dataset: &Dataset) -> Result<DatasetProfile> {
        if dataset.dropped_rows > 0 {
            warn!(
                dropped = dataset.dropped_rows,
                kept = dataset.row_count(),
                "dropped rows with mismatched cell count"
            );
        }
        if dataset.rows.is_empty() {
            return Err(Error::NoValidRows {
                dropped: dataset.dropped_rows,
            });
        }

        let columns = dataset
            .columns
            .iter()
            .enumerate()
            .map(|(idx, name)| self.profile_column(name, dataset.column_cells(idx)))
            .collect::<Vec<_>>();

        let present: usize = columns.iter().map(|column| column.count).sum();
        let cells = dataset.row_count() * dataset.column_count();
        let completeness = if cells == 0 {
            0.0
        } else {
            round2(present as f64 / cells as f64 * 100.0)
        };

        Ok(DatasetProfile {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            columns,
            completeness,
            dropped_rows: dataset.dropped_rows,
        })
    }

    fn profile_column<'a>(
        &self,
        name: &str,
        cells: impl Iterator<Item = &'a str>,
    ) -> ColumnStatistic {
        let mut total = 0usize;
        let mut values = Vec::new();
        for cell in cells {
            total += 1;
            if !is_missing(cell) {
                values.push(cell.trim());
            }
        }

        let numbers: Vec<f64> = values.iter().filter_map(|value| parse_finite(value)).collect();
        let distinct_count = values.iter().collect::<HashSet<_>>().len();
        let numerical = !values.is_empty()
            && numbers.len() as f64 / values.len() as f64 > self.options.numeric_threshold;

        debug!(
            column = %name,
            present = values.len(),
            numeric = numbers.len(),
            numerical,
            "classified column"
        );

        let summary = if numerical {
            ColumnSummary::Numerical(self.numerical_summary(numbers))
        } else {
            ColumnSummary::Categorical(self.categorical_summary(&values))
        };

        ColumnStatistic {
            name: name.to_string(),
            count: values.len(),
            distinct_count,
            missing_count: total - values.len(),
            summary,
        }
    }

    fn numerical_summary(&self, mut numbers: Vec<f64>) -> NumericalSummary {
        let mean = mean(&numbers);
        let std_dev = population_std_dev(&numbers, mean);
        numbers.sort_by(f64::total_cmp);

        let quartiles = quartiles(&numbers);
        let bins = bin_count(
            numbers.len(),
            self.options.min_histogram_bins,
            self.options.max_histogram_bins,
        );

        NumericalSummary {
            min: round2(numbers.first().copied().unwrap_or_default()),
            max: round2(numbers.last().copied().unwrap_or_default()),
            mean: round2(mean),
            std_dev: round2(std_dev),
            quartiles: Quartiles {
                q1: round2(quartiles.q1),
                median: round2(quartiles.median),
                q3: round2(quartiles.q3),
            },
            histogram: histogram(&numbers, bins),
        }
    }

    fn categorical_summary(&self, values: &[&str]) -> CategoricalSummary {
        // Insertion-ordered frequency table; ties resolve to first seen.
        let mut order: Vec<FrequencyEntry> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for value in values {
            match index.get(value) {
                Some(&pos) => order[pos].count += 1,
                None => {
                    index.insert(*value, order.len());
                    order.push(FrequencyEntry {
                        value: value.to_string(),
                        count: 1,
                    });
                }
            }
        }

        let sample_values = order
            .iter()
            .take(self.options.sample_limit)
            .map(|entry| entry.value.clone())
            .collect();

        let mut ranked = order;
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(self.options.top_values);

        CategoricalSummary {
            sample_values,
            most_common: ranked.first().cloned(),
            histogram: ranked,
        }
    }
}

fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")
}
