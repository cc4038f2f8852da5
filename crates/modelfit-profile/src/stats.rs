//! Numeric helpers used by the profiler.

use crate::model::{HistogramBucket, Quartiles};

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a cell as a finite number.
pub fn parse_finite(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation dividing by N.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Linear-interpolation quantile over an ascending slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let last = sorted.len() - 1;
    let index = (q * last as f64).clamp(0.0, last as f64);
    let lower = (index.floor() as usize).min(last);
    let upper = (index.ceil() as usize).min(last);
    let weight = index - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

pub fn quartiles(sorted: &[f64]) -> Quartiles {
    Quartiles {
        q1: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q3: quantile(sorted, 0.75),
    }
}

/// `clamp(round(sqrt(n)), min_bins, max_bins)`.
pub fn bin_count(n: usize, min_bins: usize, max_bins: usize) -> usize {
    let bins = (n as f64).sqrt().round() as usize;
    bins.clamp(min_bins, max_bins.max(min_bins)).max(1)
}

/// Equal-width histogram over `[min, max]` of an ascending slice.
///
/// Every bucket's upper edge is exclusive except the last one, so `max`
/// always lands in the final bucket. A zero-width range puts every value
/// in the final bucket.
pub fn histogram(sorted: &[f64], bins: usize) -> Vec<HistogramBucket> {
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    let bins = bins.max(1);
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &value in sorted {
        let idx = if value >= max || width == 0.0 {
            bins - 1
        } else {
            (((value - min) / width).floor() as usize).min(bins - 1)
        };
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| {
            let lower = min + width * idx as f64;
            let upper = if idx + 1 == bins {
                max
            } else {
                min + width * (idx + 1) as f64
            };
            HistogramBucket {
                label: format!("{lower:.2}-{upper:.2}"),
                lower: round2(lower),
                upper: round2(upper),
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_between_neighbours() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 0.25), 1.75);
        assert_eq!(quantile(&sorted, 0.75), 3.25);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn single_value_quartiles_collapse() {
        let q = quartiles(&[7.0]);
        assert_eq!((q.q1, q.median, q.q3), (7.0, 7.0, 7.0));
    }

    #[test]
    fn bin_count_is_clamped() {
        assert_eq!(bin_count(1, 5, 10), 5);
        assert_eq!(bin_count(49, 5, 10), 7);
        assert_eq!(bin_count(10_000, 5, 10), 10);
    }

    #[test]
    fn max_lands_in_last_bucket() {
        let sorted = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let buckets = histogram(&sorted, 5);
        assert_eq!(buckets.len(), 5);
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[4].count, 2);
        assert_eq!(buckets[4].label, "4.00-5.00");
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 6);
    }

    #[test]
    fn zero_width_range_uses_last_bucket() {
        let buckets = histogram(&[3.0, 3.0, 3.0], 5);
        assert_eq!(buckets[4].count, 3);
        assert!(buckets[..4].iter().all(|bucket| bucket.count == 0));
    }

    #[test]
    fn rejects_non_finite_numbers() {
        assert_eq!(parse_finite(" 4.5 "), Some(4.5));
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_finite("NaN"), None);
        assert_eq!(parse_finite("abc"), None);
    }
}
