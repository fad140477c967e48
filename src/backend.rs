// Backend primitives and the line-strip reference backend

use crate::error::{PlotError, Result};

/// Terminal columns per horizontal data unit in the strip backend
pub const COLUMNS_PER_UNIT: f64 = 2.0;

/// Longest run of columns or rows a single strip primitive may emit
pub const MAX_RUN: usize = 4096;

/// Drawing strategy behind a `Canvas`.
///
/// Primitives receive already-normalized coordinates and the fully resolved
/// symbol string (color or reset code included), and draw into whatever
/// buffer the backend keeps. `render` turns that buffer into text.
pub trait Backend {
    fn scatter(&mut self, xs: &[f64], ys: &[f64], symbol: &str) -> Result<()>;

    /// Continuous curve; without an override every point becomes its own
    /// horizontal bar from 0 to x on row y
    fn plot(&mut self, xs: &[f64], ys: &[f64], symbol: &str) -> Result<()> {
        for (&x, &y) in xs.iter().zip(ys) {
            self.hbar(x, y, symbol, 0.0)?;
        }
        Ok(())
    }

    fn bar(&mut self, x: f64, y: f64, symbol: &str, ymin: f64) -> Result<()>;

    fn hbar(&mut self, x: f64, y: f64, symbol: &str, xmin: f64) -> Result<()>;

    fn render(&self) -> String;
}

/// Appends one line of output per primitive, with no fixed frame
#[derive(Debug, Clone, Default)]
pub struct StripBackend {
    lines: Vec<String>,
}

impl StripBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Backend for StripBackend {
    fn scatter(&mut self, xs: &[f64], ys: &[f64], symbol: &str) -> Result<()> {
        let lines = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| Ok(format!("{}{} ({:.1},{:.1})", padding(columns(x))?, symbol, x, y)))
            .collect::<Result<Vec<_>>>()?;
        self.lines.extend(lines);
        Ok(())
    }

    fn bar(&mut self, x: f64, y: f64, symbol: &str, ymin: f64) -> Result<()> {
        let (low, high) = if y < ymin { (y, ymin) } else { (ymin, y) };
        // One row per data unit, at least one so the bar stays visible
        let rows = run_length((high as i64).saturating_sub(low as i64).max(1))?;
        let line = format!("{}{}", padding(columns(x))?, symbol);
        for _ in 0..rows {
            self.lines.push(line.clone());
        }
        Ok(())
    }

    fn hbar(&mut self, x: f64, _y: f64, symbol: &str, xmin: f64) -> Result<()> {
        let (x, xmin) = if x < xmin { (xmin, x) } else { (x, xmin) };
        let x = columns(x);
        let xmin = columns(xmin);
        let length = run_length(x.saturating_sub(xmin).max(1))?;
        self.lines
            .push(format!("{}{}", padding(xmin)?, symbol.repeat(length)));
        Ok(())
    }

    fn render(&self) -> String {
        self.lines.join("\n")
    }
}

fn columns(value: f64) -> i64 {
    (value * COLUMNS_PER_UNIT) as i64
}

fn padding(columns: i64) -> Result<String> {
    Ok(" ".repeat(run_length(columns.max(0))?))
}

fn run_length(cells: i64) -> Result<usize> {
    usize::try_from(cells)
        .ok()
        .filter(|&n| n <= MAX_RUN)
        .ok_or_else(|| {
            PlotError::Configuration(format!(
                "strip run of {} cells exceeds the limit of {}",
                cells, MAX_RUN
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hbar_scales_by_two() {
        let mut backend = StripBackend::new();
        backend.hbar(2.0, 1.0, "*", 0.0).unwrap();
        assert_eq!(backend.render(), "****");
    }

    #[test]
    fn test_hbar_offset_and_swap() {
        let mut backend = StripBackend::new();
        backend.hbar(1.0, 0.0, "#", 3.0).unwrap();
        // swapped to xmin=1, x=3 -> columns 2..6
        assert_eq!(backend.render(), "  ####");
    }

    #[test]
    fn test_hbar_zero_width_still_visible() {
        let mut backend = StripBackend::new();
        backend.hbar(0.0, 0.0, "=", 0.0).unwrap();
        backend.hbar(1.2, 0.0, "=", 1.0).unwrap();
        assert_eq!(backend.lines(), &["=".to_string(), "  =".to_string()]);
    }

    #[test]
    fn test_default_plot_is_bars() {
        let mut backend = StripBackend::new();
        backend.plot(&[1.0, 2.0], &[5.0, 6.0], "o").unwrap();
        assert_eq!(backend.render(), "oo\noooo");
    }

    #[test]
    fn test_scatter_lines() {
        let mut backend = StripBackend::new();
        backend.scatter(&[0.0, 1.5], &[2.0, -1.26], "*").unwrap();
        assert_eq!(backend.render(), "* (0.0,2.0)\n   * (1.5,-1.3)");
    }

    #[test]
    fn test_bar_column() {
        let mut backend = StripBackend::new();
        backend.bar(1.0, 5.0, "|", 2.0).unwrap();
        assert_eq!(backend.lines().len(), 3);
        assert!(backend.lines().iter().all(|l| l == "  |"));
    }

    #[test]
    fn test_bar_minimum_height() {
        let mut backend = StripBackend::new();
        backend.bar(0.0, 0.0, "|", 0.0).unwrap();
        assert_eq!(backend.render(), "|");
    }

    #[test]
    fn test_extreme_hbar_is_rejected() {
        let mut backend = StripBackend::new();
        let err = backend.hbar(1e300, 0.0, "*", -1e300).unwrap_err();
        assert!(matches!(err, PlotError::Configuration(_)));
        assert!(backend.lines().is_empty());
    }

    #[test]
    fn test_extreme_bar_and_scatter_are_rejected() {
        let mut backend = StripBackend::new();
        assert!(backend.bar(0.0, 1e300, "|", -1e300).is_err());
        assert!(backend.bar(1e300, 1.0, "|", 0.0).is_err());
        assert!(backend.scatter(&[1e18], &[0.0], "*").is_err());
        assert!(backend.lines().is_empty());
    }

    #[test]
    fn test_negative_offset_clamps_to_margin() {
        let mut backend = StripBackend::new();
        backend.hbar(-1.0, 0.0, "#", -3.0).unwrap();
        assert_eq!(backend.render(), "####");
    }

    #[test]
    fn test_empty_render() {
        assert_eq!(StripBackend::new().render(), "");
    }
}
