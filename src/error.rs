// Error types shared by the canvas, palettes and backends

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Conversion error: cannot interpret '{value}' as a number")]
    Conversion { value: String },

    #[error("Shape error: x has {x_len} values but y has {y_len}")]
    Shape { x_len: usize, y_len: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;

/// Fail with `PlotError::Shape` unless both coordinate sequences line up
pub fn check_shape(x_len: usize, y_len: usize) -> Result<()> {
    if x_len != y_len {
        return Err(PlotError::Shape { x_len, y_len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_shape_equal() {
        assert!(check_shape(3, 3).is_ok());
        assert!(check_shape(0, 0).is_ok());
    }

    #[test]
    fn test_check_shape_mismatch() {
        let err = check_shape(2, 5).unwrap_err();
        assert!(matches!(err, PlotError::Shape { x_len: 2, y_len: 5 }));
        assert_eq!(err.to_string(), "Shape error: x has 2 values but y has 5");
    }

    #[test]
    fn test_conversion_message() {
        let err = PlotError::Conversion { value: "abc".to_string() };
        assert!(err.to_string().contains("'abc'"));
    }
}
