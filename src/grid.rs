// Fixed-size character grid backend

use crate::backend::Backend;
use crate::error::{PlotError, Result};

/// Grid size in characters and the data ranges it spans
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            width: 60,
            height: 20,
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
        }
    }
}

impl GridConfig {
    pub fn new(width: usize, height: usize) -> Self {
        GridConfig {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = (min, max);
        self
    }

    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = (min, max);
        self
    }

    /// Fit the x range to the data with a little padding
    pub fn fit_x(mut self, values: &[f64], include_zero: bool) -> Self {
        self.x_range = fit_range(values, include_zero);
        self
    }

    /// Fit the y range to the data with a little padding
    pub fn fit_y(mut self, values: &[f64], include_zero: bool) -> Self {
        self.y_range = fit_range(values, include_zero);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlotError::Configuration(format!(
                "grid must be at least 1x1 (got {}x{})",
                self.width, self.height
            )));
        }
        for (axis, (min, max)) in [("x", self.x_range), ("y", self.y_range)] {
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(PlotError::Configuration(format!(
                    "{} range must be finite and increasing (got {}..{})",
                    axis, min, max
                )));
            }
        }
        Ok(())
    }
}

fn fit_range(values: &[f64], include_zero: bool) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter().filter(|v| v.is_finite()) {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    if min == f64::INFINITY {
        min = 0.0;
        max = 1.0;
    }

    if include_zero {
        if min > 0.0 {
            min = 0.0;
        }
        if max < 0.0 {
            max = 0.0;
        }
    }

    pad_range(min, max)
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 1.0, max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }
}

// Line parameter of a clipped endpoint and the edge it was clipped against
type Clipped = (f64, Option<(bool, f64)>);

/// Draws into a `width x height` grid; each cell holds one resolved symbol
#[derive(Debug, Clone)]
pub struct GridBackend {
    config: GridConfig,
    cells: Vec<Vec<Option<String>>>,
}

impl GridBackend {
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let cells = vec![vec![None; config.width]; config.height];
        Ok(GridBackend { config, cells })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Symbol drawn at a cell, if any
    pub fn cell(&self, column: usize, row: usize) -> Option<&str> {
        self.cells.get(row)?.get(column)?.as_deref()
    }

    // Fractional cell coordinates; row 0 is the top of the grid
    fn column_position(&self, x: f64) -> f64 {
        let (min, max) = self.config.x_range;
        (x - min) / (max - min) * (self.config.width - 1) as f64
    }

    fn row_position(&self, y: f64) -> f64 {
        let (min, max) = self.config.y_range;
        let last = (self.config.height - 1) as f64;
        last - (y - min) / (max - min) * last
    }

    // Nearest cell, saturating far outside the grid
    fn column_of(&self, x: f64) -> i64 {
        self.column_position(x).round() as i64
    }

    fn row_of(&self, y: f64) -> i64 {
        self.row_position(y).round() as i64
    }

    /// Clip a segment in cell space to the grid rectangle (Liang-Barsky)
    fn clip(&self, from: (f64, f64), to: (f64, f64)) -> Option<((i64, i64), (i64, i64))> {
        let max_column = (self.config.width - 1) as f64;
        let max_row = (self.config.height - 1) as f64;
        let (dc, dr) = (to.0 - from.0, to.1 - from.1);
        if !dc.is_finite() || !dr.is_finite() {
            return None;
        }

        // (p, q, clipped axis is the column, edge value)
        let edges = [
            (-dc, from.0, true, 0.0),
            (dc, max_column - from.0, true, max_column),
            (-dr, from.1, false, 0.0),
            (dr, max_row - from.1, false, max_row),
        ];
        let mut enter: Clipped = (0.0, None);
        let mut exit: Clipped = (1.0, None);
        for (p, q, is_column, edge) in edges {
            if p == 0.0 {
                // Parallel to this edge and outside it
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                if t > enter.0 {
                    enter = (t, Some((is_column, edge)));
                }
            } else if t < exit.0 {
                exit = (t, Some((is_column, edge)));
            }
            if enter.0 > exit.0 {
                return None;
            }
        }

        // Endpoints land exactly on the edge that clipped them
        let cell = |(t, snap): Clipped| {
            let mut column = from.0 + t * dc;
            let mut row = from.1 + t * dr;
            match snap {
                Some((true, edge)) => column = edge,
                Some((false, edge)) => row = edge,
                None => {}
            }
            (
                column.round().clamp(0.0, max_column) as i64,
                row.round().clamp(0.0, max_row) as i64,
            )
        };
        Some((cell(enter), cell(exit)))
    }

    fn clamp_column(&self, column: i64) -> i64 {
        column.clamp(0, self.config.width as i64 - 1)
    }

    fn clamp_row(&self, row: i64) -> i64 {
        row.clamp(0, self.config.height as i64 - 1)
    }

    fn set(&mut self, column: i64, row: i64, symbol: &str) {
        if column < 0 || row < 0 {
            return;
        }
        if let Some(cell) = self
            .cells
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(column as usize))
        {
            *cell = Some(symbol.to_string());
        }
    }

    fn line(&mut self, from: (i64, i64), to: (i64, i64), symbol: &str) {
        let (mut c, mut r) = from;
        let dc = (to.0 - c).abs();
        let dr = -(to.1 - r).abs();
        let sc = if c < to.0 { 1 } else { -1 };
        let sr = if r < to.1 { 1 } else { -1 };
        let mut err = dc + dr;

        loop {
            self.set(c, r, symbol);
            if c == to.0 && r == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dr {
                err += dr;
                c += sc;
            }
            if e2 <= dc {
                err += dc;
                r += sr;
            }
        }
    }
}

impl Backend for GridBackend {
    fn scatter(&mut self, xs: &[f64], ys: &[f64], symbol: &str) -> Result<()> {
        for (&x, &y) in xs.iter().zip(ys) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let (c, r) = (self.column_of(x), self.row_of(y));
            self.set(c, r, symbol);
        }
        Ok(())
    }

    fn plot(&mut self, xs: &[f64], ys: &[f64], symbol: &str) -> Result<()> {
        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| (self.column_position(x), self.row_position(y)))
            .collect();

        match points.as_slice() {
            [] => {}
            [only] => self.set(only.0.round() as i64, only.1.round() as i64, symbol),
            _ => {
                for pair in points.windows(2) {
                    if let Some((from, to)) = self.clip(pair[0], pair[1]) {
                        self.line(from, to, symbol);
                    }
                }
            }
        }
        Ok(())
    }

    fn bar(&mut self, x: f64, y: f64, symbol: &str, ymin: f64) -> Result<()> {
        let column = self.column_of(x);
        let top = self.clamp_row(self.row_of(y));
        let bottom = self.clamp_row(self.row_of(ymin));
        for row in top.min(bottom)..=top.max(bottom) {
            self.set(column, row, symbol);
        }
        Ok(())
    }

    fn hbar(&mut self, x: f64, y: f64, symbol: &str, xmin: f64) -> Result<()> {
        let row = self.row_of(y);
        let end = self.clamp_column(self.column_of(x));
        let start = self.clamp_column(self.column_of(xmin));
        for column in start.min(end)..=start.max(end) {
            self.set(column, row, symbol);
        }
        Ok(())
    }

    fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_deref().unwrap_or(" "))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid(width: usize, height: usize) -> GridBackend {
        let config = GridConfig::new(width, height)
            .x_range(0.0, (width - 1) as f64)
            .y_range(0.0, (height - 1) as f64);
        GridBackend::new(config).unwrap()
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let result = GridBackend::new(GridConfig::new(0, 5));
        assert!(matches!(result, Err(PlotError::Configuration(_))));
    }

    #[test]
    fn test_validate_rejects_flat_range() {
        let config = GridConfig::new(10, 5).x_range(2.0, 2.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("x range"));
    }

    #[test]
    fn test_fit_range_padding() {
        let config = GridConfig::default().fit_x(&[0.0, 10.0], false);
        assert_eq!(config.x_range, (-0.5, 10.5));
    }

    #[test]
    fn test_fit_range_single_value() {
        let config = GridConfig::default().fit_y(&[5.0], false);
        assert_eq!(config.y_range, (4.0, 6.0));
    }

    #[test]
    fn test_fit_range_include_zero() {
        let config = GridConfig::default().fit_y(&[10.0, 20.0], true);
        assert_eq!(config.y_range, (-1.0, 21.0));
    }

    #[test]
    fn test_fit_range_empty() {
        let config = GridConfig::default().fit_x(&[], false);
        let (min, max) = config.x_range;
        assert!((min + 0.05).abs() < 1e-12);
        assert!((max - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_scatter_places_points() {
        let mut grid = unit_grid(3, 3);
        grid.scatter(&[0.0, 2.0], &[0.0, 2.0], "*").unwrap();
        assert_eq!(grid.render(), "  *\n   \n*  ");
        assert_eq!(grid.cell(0, 2), Some("*"));
        assert_eq!(grid.cell(1, 1), None);
    }

    #[test]
    fn test_scatter_drops_out_of_range() {
        let mut grid = unit_grid(3, 3);
        grid.scatter(&[-5.0, 10.0], &[1.0, 1.0], "*").unwrap();
        assert_eq!(grid.render(), "   \n   \n   ");
    }

    #[test]
    fn test_plot_connects_points() {
        let mut grid = unit_grid(4, 4);
        grid.plot(&[0.0, 3.0], &[0.0, 3.0], "o").unwrap();
        assert_eq!(grid.render(), "   o\n  o \n o  \no   ");
    }

    #[test]
    fn test_plot_far_off_points_are_clipped() {
        let config = GridConfig::new(10, 5);
        let mut grid = GridBackend::new(config).unwrap();
        grid.plot(&[-1e300, 1e300], &[0.5, 0.5], "*").unwrap();
        assert_eq!(grid.render().lines().nth(2), Some("**********"));

        let mut grid = GridBackend::new(GridConfig::new(10, 5)).unwrap();
        grid.plot(&[0.0, 1e13], &[0.0, 0.0], "*").unwrap();
        assert_eq!(grid.render().lines().last(), Some("**********"));
    }

    #[test]
    fn test_plot_segment_crossing_edge() {
        let mut grid = unit_grid(4, 4);
        // from (1, 1) up and right, leaving through the top edge
        grid.plot(&[1.0, 7.0], &[1.0, 7.0], "o").unwrap();
        assert_eq!(grid.render(), "   o\n  o \n o  \n    ");
    }

    #[test]
    fn test_plot_segment_fully_outside_is_skipped() {
        let mut grid = unit_grid(4, 4);
        grid.plot(&[-10.0, -5.0, 20.0], &[10.0, 50.0, 50.0], "o").unwrap();
        assert_eq!(grid.render(), "    \n    \n    \n    ");
    }

    #[test]
    fn test_bar_fills_column() {
        let mut grid = unit_grid(3, 4);
        grid.bar(1.0, 2.0, "#", 0.0).unwrap();
        assert_eq!(grid.render(), "   \n # \n # \n # ");
    }

    #[test]
    fn test_hbar_fills_row_clamped() {
        let mut grid = unit_grid(4, 2);
        grid.hbar(99.0, 1.0, "=", 1.0).unwrap();
        assert_eq!(grid.render(), " ===\n    ");
    }
}
