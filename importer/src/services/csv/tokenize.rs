use crate::error::{ImportError, Result};
use common::model::csv::TokenizedCsv;
use log::debug;

/// Trims a cell and drops every double quote in it, wherever it appears.
/// Quotes are not an escape mechanism here.
fn clean_cell(cell: &str) -> String {
    cell.trim().replace('"', "")
}

fn split_line(line: &str) -> Vec<String> {
    line.split(',').map(clean_cell).collect()
}

/// Splits raw file text into a header row and data rows.
///
/// A leading byte-order mark is dropped. Lines that are blank after trimming
/// are discarded. The first remaining line is the header row. Embedded commas are not supported: every `,` separates
/// cells.
///
/// # Errors
/// `ImportError::EmptyInput` when no non-blank line remains.
pub fn tokenize(text: &str) -> Result<TokenizedCsv> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let headers = match lines.next() {
        Some(header_line) => split_line(header_line),
        None => return Err(ImportError::EmptyInput),
    };
    let rows: Vec<Vec<String>> = lines.map(split_line).collect();

    debug!(
        "tokenized {} columns and {} data rows",
        headers.len(),
        rows.len()
    );
    Ok(TokenizedCsv { headers, rows })
}
