// Labeled horizontal bar chart

use crate::error::{check_shape, Result};

/// One line per label: `label | ====`, bars scaled so the largest value is `width` long
pub fn labeled_bars<L: AsRef<str>>(
    labels: &[L],
    values: &[f64],
    symbol: &str,
    width: usize,
) -> Result<String> {
    check_shape(labels.len(), values.len())?;

    let label_width = labels
        .iter()
        .map(|l| l.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let lines: Vec<String> = labels
        .iter()
        .zip(values)
        .map(|(label, &value)| {
            let length = if max_value > 0.0 && value > 0.0 {
                (value * width as f64 / max_value) as usize
            } else {
                0
            };
            format!(
                "{:<w$} | {}",
                label.as_ref(),
                symbol.repeat(length),
                w = label_width
            )
        })
        .collect();

    Ok(lines.join("\n"))
}
