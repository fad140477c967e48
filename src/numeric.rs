// Argument normalization: numeric conversion and bar extents

use crate::error::{PlotError, Result};

/// A value that can be read as a plot coordinate
pub trait Numeric {
    fn to_f64(&self) -> Result<f64>;
}

macro_rules! lossless_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(&self) -> Result<f64> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

lossless_numeric!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Numeric for str {
    fn to_f64(&self) -> Result<f64> {
        self.trim().parse::<f64>().map_err(|_| PlotError::Conversion {
            value: self.to_string(),
        })
    }
}

impl Numeric for String {
    fn to_f64(&self) -> Result<f64> {
        self.as_str().to_f64()
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    fn to_f64(&self) -> Result<f64> {
        (**self).to_f64()
    }
}

/// Convert every element, failing on the first non-numeric one
pub fn to_f64_vec<T: Numeric>(values: &[T]) -> Result<Vec<f64>> {
    values.iter().map(Numeric::to_f64).collect()
}

/// Length of a bar: nothing, a single end value, or a `(start, end)` pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Extent {
    #[default]
    Default,
    Scalar(f64),
    Range(f64, f64),
}

impl Extent {
    /// Resolve to `(start, end)`; the start is 0 unless a range was given
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Extent::Default => (0.0, 0.0),
            Extent::Scalar(end) => (0.0, end),
            Extent::Range(start, end) => (start, end),
        }
    }
}

impl From<f64> for Extent {
    fn from(end: f64) -> Self {
        Extent::Scalar(end)
    }
}

impl From<(f64, f64)> for Extent {
    fn from((start, end): (f64, f64)) -> Self {
        Extent::Range(start, end)
    }
}

impl From<[f64; 2]> for Extent {
    fn from([start, end]: [f64; 2]) -> Self {
        Extent::Range(start, end)
    }
}

impl From<Option<f64>> for Extent {
    fn from(end: Option<f64>) -> Self {
        end.map_or(Extent::Default, Extent::Scalar)
    }
}

macro_rules! scalar_extent {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Extent {
                fn from(end: $t) -> Self {
                    Extent::Scalar(end as f64)
                }
            }
        )*
    };
}

scalar_extent!(f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
