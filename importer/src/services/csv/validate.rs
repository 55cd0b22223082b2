use crate::error::{ImportError, Result};
use crate::services::csv::fields::{parse_number, setter_for};
use crate::services::csv::mapping::missing_required;
use common::model::asset::{AssetDraft, PreviewRecord};
use common::model::csv::{ColumnMapping, TokenizedCsv, ValidationError};
use common::model::schema::{AssetField, TargetSchema};
use log::{debug, warn};
use std::collections::HashSet;

/// Everything the validator learned from the data rows.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// One record per data row, in row order.
    pub records: Vec<PreviewRecord>,
    pub errors: Vec<ValidationError>,
    /// Category ids referenced by valid rows, first occurrence first, no repeats.
    pub referenced_categories: Vec<String>,
}

/// Column positions of the required fields, resolved once per run.
struct RequiredColumns {
    name: usize,
    value: usize,
    category_id: usize,
}

impl RequiredColumns {
    fn resolve(schema: &TargetSchema, mapping: &ColumnMapping) -> Result<Self> {
        let missing = missing_required(schema, mapping);
        if !missing.is_empty() {
            return Err(ImportError::MissingMappings(missing));
        }
        let column = |field| {
            mapping
                .column_for(field)
                .ok_or_else(|| ImportError::MissingMappings(vec![field]))
        };
        Ok(Self {
            name: column(AssetField::Name)?,
            value: column(AssetField::Value)?,
            category_id: column(AssetField::CategoryId)?,
        })
    }
}

/// Display number of a zero-based data row: header is line 1, rows start at 2.
fn display_row(row_index: usize) -> usize {
    row_index + 2
}

/// Validates and coerces every data row against the mapping.
///
/// Required fields are checked independently, so a row can collect up to
/// three errors. A failing row is still materialized, as a stub whose name
/// falls back to `"Row <n> (Error)"`, so the preview lists every input row
/// once. Valid rows additionally receive each mapped optional field with a
/// non-empty cell; optional cells that fail numeric coercion are dropped
/// without an error.
///
/// # Errors
/// `ImportError::MissingMappings` when a required field has no column. This
/// is the mapping gate; no rows are examined in that case.
pub fn validate_rows(
    schema: &TargetSchema,
    csv: &TokenizedCsv,
    mapping: &ColumnMapping,
) -> Result<ValidationReport> {
    let required = RequiredColumns::resolve(schema, mapping)?;
    let optional: Vec<(AssetField, usize)> = schema
        .optional()
        .filter_map(|d| mapping.column_for(d.field).map(|column| (d.field, column)))
        .collect();

    let mut report = ValidationReport::default();
    let mut seen_categories = HashSet::new();

    for (row_index, row) in csv.rows.iter().enumerate() {
        let row_number = display_row(row_index);
        let name = TokenizedCsv::cell(row, required.name);
        let raw_value = TokenizedCsv::cell(row, required.value);
        let category_id = TokenizedCsv::cell(row, required.category_id);

        let mut row_errors = Vec::new();
        if name.is_empty() {
            row_errors.push("Name is missing.".to_string());
        }
        let value = parse_number(raw_value);
        if value.is_err() {
            row_errors.push(format!("Value \"{}\" is not a valid number.", raw_value));
        }
        if category_id.is_empty() {
            row_errors.push("Category ID is missing.".to_string());
        }

        let value = match value {
            Ok(value) if row_errors.is_empty() => value,
            _ => {
                let fallback = if name.is_empty() {
                    format!("Row {} (Error)", row_number)
                } else {
                    name.to_string()
                };
                report.records.push(PreviewRecord {
                    row: row_number,
                    draft: AssetDraft {
                        name: Some(fallback),
                        ..AssetDraft::default()
                    },
                });
                report
                    .errors
                    .extend(row_errors.into_iter().map(|message| ValidationError {
                        row: row_number,
                        message,
                    }));
                continue;
            }
        };

        let mut draft = AssetDraft {
            name: Some(name.to_string()),
            value: Some(value),
            category_id: Some(category_id.to_string()),
            ..AssetDraft::default()
        };
        for (field, column) in &optional {
            let cell = TokenizedCsv::cell(row, *column);
            if cell.is_empty() {
                continue;
            }
            if let Err(e) = setter_for(*field)(&mut draft, cell) {
                debug!("row {}: skipping {}: {}", row_number, field, e);
            }
        }

        if seen_categories.insert(category_id.to_string()) {
            report.referenced_categories.push(category_id.to_string());
        }
        report.records.push(PreviewRecord {
            row: row_number,
            draft,
        });
    }

    if !report.errors.is_empty() {
        warn!(
            "{} validation errors across {} rows",
            report.errors.len(),
            csv.rows.len()
        );
    }
    Ok(report)
}
