use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::io::Read;

use crate::numeric::to_f64_vec;

#[derive(Debug, Clone)]
pub struct CsvData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

/// Read headed CSV from any source (stdin in the binary)
pub fn read_csv<R: Read>(source: R) -> Result<CsvData> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(source);

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read CSV record")?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    if rows.is_empty() {
        return Err(anyhow!("CSV must contain at least one data row"));
    }

    Ok(CsvData { headers, rows })
}

pub fn parse_column_selector(input: &str) -> ColumnSelector {
    match input.parse::<usize>() {
        Ok(index) => ColumnSelector::Index(index),
        Err(_) => ColumnSelector::Name(input.to_string()),
    }
}

fn column_position(data: &CsvData, selector: ColumnSelector) -> Result<(usize, String)> {
    match selector {
        ColumnSelector::Index(idx) => {
            if idx >= data.headers.len() {
                return Err(anyhow!(
                    "Column index {} out of bounds (available columns: {})",
                    idx,
                    data.headers.len()
                ));
            }
            Ok((idx, data.headers[idx].clone()))
        }
        ColumnSelector::Name(name) => {
            let idx = data
                .headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(&name))
                .ok_or_else(|| {
                    anyhow!(
                        "Column '{}' not found. Available columns: {}",
                        name,
                        data.headers.join(", ")
                    )
                })?;
            Ok((idx, data.headers[idx].clone()))
        }
    }
}

/// Raw cell text of one column, with its header name
pub fn extract_column_as_string(data: &CsvData, selector: ColumnSelector) -> Result<(String, Vec<String>)> {
    let (column_index, column_name) = column_position(data, selector)?;

    let mut values = Vec::new();
    for (row_idx, row) in data.rows.iter().enumerate() {
        let cell = row.get(column_index).ok_or_else(|| {
            anyhow!(
                "Row {} has only {} columns, expected at least {}",
                row_idx + 1,
                row.len(),
                column_index + 1
            )
        })?;
        values.push(cell.clone());
    }

    Ok((column_name, values))
}

/// Numeric values of one column, with its header name
pub fn extract_column(data: &CsvData, selector: ColumnSelector) -> Result<(String, Vec<f64>)> {
    let (column_name, raw) = extract_column_as_string(data, selector)?;
    let values = to_f64_vec(&raw)
        .with_context(|| format!("Failed to parse column '{}'", column_name))?;
    Ok((column_name, values))
}
