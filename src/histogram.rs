// Equal-width binning and a standalone vertical histogram

use crate::error::{PlotError, Result};

/// Half-open bin `[start, end)`; the last bin also holds its right edge
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// Count finite values into `bins` equal-width bins spanning the data
pub fn bins(data: &[f64], bins: usize) -> Result<Vec<Bin>> {
    if bins == 0 {
        return Err(PlotError::Configuration(
            "histogram needs at least one bin".to_string(),
        ));
    }

    let finite: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    let (low, high) = match finite.iter().copied().fold(None, |acc: Option<(f64, f64)>, v| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) {
        None => (0.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 0.5, hi + 0.5),
        Some(range) => range,
    };

    let width = (high - low) / bins as f64;
    let mut result: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            start: low + width * i as f64,
            end: if i + 1 == bins { high } else { low + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in finite {
        let index = (((v - low) / width) as usize).min(bins - 1);
        result[index].count += 1;
    }

    Ok(result)
}

/// Render a vertical histogram `height` rows tall, one column per bin
pub fn vertical(data: &[f64], bin_count: usize, symbol: &str, height: usize) -> Result<String> {
    let counts: Vec<usize> = bins(data, bin_count)?.iter().map(|b| b.count).collect();
    let max_count = counts.iter().copied().max().unwrap_or(0);

    let scaled: Vec<usize> = counts
        .iter()
        .map(|&count| {
            if max_count == 0 {
                0
            } else {
                count * height / max_count
            }
        })
        .collect();

    let rows: Vec<String> = (1..=height)
        .rev()
        .map(|level| {
            scaled
                .iter()
                .map(|&h| format!("{} ", if h >= level { symbol } else { " " }))
                .collect()
        })
        .collect();

    Ok(rows.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_counts() {
        let data = [0.0, 1.0, 1.5, 2.0, 3.0, 4.0];
        let result = bins(&data, 4).unwrap();
        let counts: Vec<usize> = result.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 2, 1, 2]);
        assert_eq!(result[0].start, 0.0);
        assert_eq!(result[3].end, 4.0);
        assert_eq!(result[1].center(), 1.5);
    }

    #[test]
    fn test_bins_total_matches_finite_values() {
        let data = [1.0, f64::NAN, 2.0, f64::INFINITY, 9.0, 3.3];
        let total: usize = bins(&data, 3).unwrap().iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_bins_single_value() {
        let result = bins(&[5.0, 5.0], 1).unwrap();
        assert_eq!(result[0].start, 4.5);
        assert_eq!(result[0].end, 5.5);
        assert_eq!(result[0].count, 2);
    }

    #[test]
    fn test_bins_empty_data() {
        let result = bins(&[], 2).unwrap();
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_bins_zero_rejected() {
        assert!(matches!(bins(&[1.0], 0), Err(PlotError::Configuration(_))));
    }

    #[test]
    fn test_vertical_histogram() {
        let text = vertical(&[0.0, 1.0, 1.0, 1.0], 2, "#", 3).unwrap();
        // counts [1, 3] -> heights [1, 3]
        assert_eq!(text, "  # \n  # \n# # ");
    }

    #[test]
    fn test_vertical_histogram_no_data() {
        let text = vertical(&[], 2, "#", 2).unwrap();
        assert_eq!(text, "    \n    ");
    }
}
