// Color and symbol palettes for auto-assigned plot markers

use crate::error::{PlotError, Result};

/// ANSI code that returns the terminal to its default style
pub const RESET: &str = "\x1b[0m";

/// Ordered colors and symbols, cycled together by a shared index
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
    symbols: Vec<String>,
    reset: String,
}

impl Palette {
    /// Build a palette; both sequences must be non-empty
    pub fn new<C, S>(colors: C, symbols: S, reset: impl Into<String>) -> Result<Self>
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();

        if colors.is_empty() {
            return Err(PlotError::Configuration(
                "palette needs at least one color".to_string(),
            ));
        }
        if symbols.is_empty() {
            return Err(PlotError::Configuration(
                "palette needs at least one symbol".to_string(),
            ));
        }

        Ok(Palette {
            colors,
            symbols,
            reset: reset.into(),
        })
    }

    /// Bright ANSI colors with filled geometric markers
    pub fn pretty() -> Self {
        Palette {
            colors: vec![
                "\x1b[94m".to_string(), // blue
                "\x1b[91m".to_string(), // red
                "\x1b[92m".to_string(), // green
                "\x1b[93m".to_string(), // yellow
                "\x1b[95m".to_string(), // magenta
                "\x1b[96m".to_string(), // cyan
            ],
            symbols: vec![
                "●".to_string(),
                "■".to_string(),
                "▲".to_string(),
                "◆".to_string(),
                "✚".to_string(),
                "★".to_string(),
            ],
            reset: RESET.to_string(),
        }
    }

    /// No escape codes at all, only ASCII markers
    pub fn plain() -> Self {
        Palette {
            colors: vec![String::new()],
            symbols: vec![
                "*".to_string(),
                "+".to_string(),
                "o".to_string(),
                "x".to_string(),
                "#".to_string(),
                "@".to_string(),
            ],
            reset: String::new(),
        }
    }

    /// Color for a symbol index; negative indices wrap from the end
    pub fn color(&self, index: i64) -> &str {
        &self.colors[wrap(index, self.colors.len())]
    }

    /// Symbol for a symbol index; negative indices wrap from the end
    pub fn symbol(&self, index: i64) -> &str {
        &self.symbols[wrap(index, self.symbols.len())]
    }

    pub fn reset(&self) -> &str {
        &self.reset
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::pretty()
    }
}

// len is never zero: constructors reject empty sequences
fn wrap(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wrapping() {
        let palette = Palette::new(["R", "G"], ["*", "+", "o"], "X").unwrap();
        assert_eq!(palette.color(0), "R");
        assert_eq!(palette.color(1), "G");
        assert_eq!(palette.color(2), "R");
        assert_eq!(palette.symbol(2), "o");
        assert_eq!(palette.symbol(3), "*");
    }

    #[test]
    fn test_palette_negative_index() {
        let palette = Palette::new(["R", "G"], ["*", "+", "o"], "X").unwrap();
        assert_eq!(palette.color(-1), "G");
        assert_eq!(palette.symbol(-1), "o");
        assert_eq!(palette.symbol(-4), "o");
    }

    #[test]
    fn test_palette_empty_colors() {
        let result = Palette::new(Vec::<String>::new(), ["*"], "X");
        assert!(matches!(result, Err(PlotError::Configuration(_))));
    }

    #[test]
    fn test_palette_empty_symbols() {
        let result = Palette::new(["R"], Vec::<&str>::new(), "X");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("symbol"));
    }

    #[test]
    fn test_builtin_palettes() {
        let pretty = Palette::pretty();
        assert_eq!(pretty.colors().len(), pretty.symbols().len());
        assert_eq!(pretty.reset(), RESET);

        let plain = Palette::plain();
        assert_eq!(plain.color(5), "");
        assert_eq!(plain.symbol(0), "*");
        assert_eq!(plain.reset(), "");
    }
}
