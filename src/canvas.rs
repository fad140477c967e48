// Stateful drawing surface: symbol allocation, legend and plot dispatch

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::ansi;
use crate::backend::{Backend, StripBackend};
use crate::error::{check_shape, Result};
use crate::histogram;
use crate::numeric::{to_f64_vec, Extent, Numeric};
use crate::palette::Palette;

/// Accumulates plot commands on a backend and keeps a legend of titled series.
///
/// Every plot operation returns the canvas again, so calls chain:
///
/// ```
/// use ansiplot::{Canvas, Palette};
/// use std::sync::Arc;
///
/// let palette = Arc::new(Palette::plain());
/// let mut canvas = Canvas::with_palette(ansiplot::StripBackend::new(), palette);
/// canvas
///     .hbar(2.0, 0.0, Some("first"), None)?
///     .same()
///     .hbar(1.0, 1.0, Some("again"), None)?;
/// assert_eq!(canvas.text(true, false), "****\n**\n *  first\n *  again");
/// # Ok::<(), ansiplot::PlotError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Canvas<B: Backend = StripBackend> {
    symbol_state: i64,
    legend: String,
    palette: Arc<Palette>,
    backend: B,
}

impl Default for Canvas<StripBackend> {
    fn default() -> Self {
        Canvas::new(StripBackend::new())
    }
}

impl<B: Backend> Canvas<B> {
    /// Canvas on `backend` with the default palette
    pub fn new(backend: B) -> Self {
        Self::with_palette(backend, Arc::new(Palette::default()))
    }

    pub fn with_palette(backend: B, palette: Arc<Palette>) -> Self {
        Canvas {
            symbol_state: 0,
            legend: String::new(),
            palette,
            backend,
        }
    }

    /// Start auto-assignment at `symbol_state` instead of 0
    pub fn starting_at(mut self, symbol_state: i64) -> Self {
        self.symbol_state = symbol_state;
        self
    }

    pub fn symbol_state(&self) -> i64 {
        self.symbol_state
    }

    pub fn legend(&self) -> &str {
        &self.legend
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Color the next auto-assigned symbol will use
    pub fn current_color(&self) -> &str {
        self.palette.color(self.symbol_state)
    }

    /// Symbol the next auto-assigned draw will use, without its color
    pub fn current_colorless_symbol(&self) -> &str {
        self.palette.symbol(self.symbol_state)
    }

    /// Step back one allocation so the next auto-assigned draw repeats the previous style
    pub fn same(&mut self) -> &mut Self {
        self.symbol_state -= 1;
        self
    }

    fn prepare_symbol(&mut self, title: Option<&str>, symbol: Option<&str>) -> String {
        let resolved = match symbol {
            None => {
                let auto = format!("{}{}", self.current_color(), self.current_colorless_symbol());
                debug!(symbol_state = self.symbol_state, "auto-assigned palette symbol");
                self.symbol_state += 1;
                auto
            }
            Some(explicit) => format!("{}{}", self.palette.reset(), explicit),
        };

        if let Some(title) = title {
            self.legend
                .push_str(&format!("\n {} {} {}", resolved, self.palette.reset(), title));
        }

        resolved
    }

    // Allocation and legend changes are undone if the backend call fails
    fn draw<F>(
        &mut self,
        title: Option<&str>,
        symbol: Option<&str>,
        primitive: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut B, &str) -> Result<()>,
    {
        let saved_state = self.symbol_state;
        let saved_legend = self.legend.len();

        let resolved = self.prepare_symbol(title, symbol);
        if let Err(err) = primitive(&mut self.backend, &resolved) {
            warn!(error = %err, "backend primitive failed, rolling back symbol allocation");
            self.symbol_state = saved_state;
            self.legend.truncate(saved_legend);
            return Err(err);
        }
        Ok(self)
    }

    /// Plot a single point
    pub fn point<X: Numeric, Y: Numeric>(
        &mut self,
        x: X,
        y: Y,
        title: Option<&str>,
        symbol: Option<&str>,
    ) -> Result<&mut Self> {
        let x = x.to_f64()?;
        let y = y.to_f64()?;
        self.scatter(&[x], &[y], title, symbol)
    }

    /// Plot a collection of points
    pub fn scatter<X: Numeric, Y: Numeric>(
        &mut self,
        xs: &[X],
        ys: &[Y],
        title: Option<&str>,
        symbol: Option<&str>,
    ) -> Result<&mut Self> {
        let (xs, ys) = coordinates(xs, ys)?;
        debug!(points = xs.len(), "scatter");
        self.draw(title, symbol, |backend, symbol| backend.scatter(&xs, &ys, symbol))
    }

    /// Plot a continuous curve through the points, in the order given
    pub fn plot<X: Numeric, Y: Numeric>(
        &mut self,
        xs: &[X],
        ys: &[Y],
        title: Option<&str>,
        symbol: Option<&str>,
    ) -> Result<&mut Self> {
        let (xs, ys) = coordinates(xs, ys)?;
        debug!(points = xs.len(), "plot");
        self.draw(title, symbol, |backend, symbol| backend.plot(&xs, &ys, symbol))
    }

    /// Vertical bar at `x`, spanning `y` (from 0) or a `(ymin, y)` range
    pub fn bar<X: Numeric>(
        &mut self,
        x: X,
        y: impl Into<Extent>,
        title: Option<&str>,
        symbol: Option<&str>,
    ) -> Result<&mut Self> {
        let x = x.to_f64()?;
        let (ymin, y) = y.into().bounds();
        debug!(x, y, ymin, "bar");
        self.draw(title, symbol, |backend, symbol| backend.bar(x, y, symbol, ymin))
    }

    /// Horizontal bar on row `y`, spanning `x` (from 0) or a `(xmin, x)` range
    pub fn hbar<Y: Numeric>(
        &mut self,
        x: impl Into<Extent>,
        y: Y,
        title: Option<&str>,
        symbol: Option<&str>,
    ) -> Result<&mut Self> {
        let y = y.to_f64()?;
        let (xmin, x) = x.into().bounds();
        debug!(x, y, xmin, "hbar");
        self.draw(title, symbol, |backend, symbol| backend.hbar(x, y, symbol, xmin))
    }

    /// Histogram of `data` as one bar per bin, sharing a single symbol and legend entry
    pub fn histogram<T: Numeric>(
        &mut self,
        data: &[T],
        bins: usize,
        title: Option<&str>,
        symbol: Option<&str>,
    ) -> Result<&mut Self> {
        let data = to_f64_vec(data)?;
        let bins = histogram::bins(&data, bins)?;
        debug!(values = data.len(), bins = bins.len(), "histogram");
        self.draw(title, symbol, |backend, symbol| {
            for bin in &bins {
                backend.bar(bin.center(), bin.count as f64, symbol, 0.0)?;
            }
            Ok(())
        })
    }

    /// Backend rendering followed by the legend (or a bare newline),
    /// optionally with all ANSI escape sequences removed
    pub fn text(&self, legend: bool, colorless: bool) -> String {
        let mut plot = self.backend.render();
        if legend {
            plot.push_str(&self.legend);
        } else {
            plot.push('\n');
        }
        trace!(bytes = plot.len(), legend, colorless, "rendered canvas");
        if colorless {
            plot = ansi::strip(&plot);
        }
        plot
    }

    /// Write `text(legend, colorless)` and a newline to stdout
    pub fn show(&self, legend: bool, colorless: bool) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", self.text(legend, colorless))?;
        handle.flush()?;
        Ok(())
    }
}

impl<B: Backend> fmt::Display for Canvas<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text(true, false))
    }
}

fn coordinates<X: Numeric, Y: Numeric>(xs: &[X], ys: &[Y]) -> Result<(Vec<f64>, Vec<f64>)> {
    check_shape(xs.len(), ys.len())?;
    Ok((to_f64_vec(xs)?, to_f64_vec(ys)?))
}
