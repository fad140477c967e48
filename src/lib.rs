// Library exports for ansiplot

pub mod ansi;
pub mod backend;
pub mod canvas;
pub mod csv_reader;
pub mod error;
pub mod grid;
pub mod histogram;
pub mod labels;
pub mod numeric;
pub mod palette;

pub use backend::{Backend, StripBackend};
pub use canvas::Canvas;
pub use error::{PlotError, Result};
pub use grid::{GridBackend, GridConfig};
pub use numeric::{Extent, Numeric};
pub use palette::Palette;
