use crate::model::schema::AssetField;
use serde::{Deserialize, Serialize};

/// A CSV file split into its header row and data rows.
///
/// Produced by the tokenizer in the `importer` crate. Rows keep their source
/// order and are positional: cell `i` belongs to `headers[i]`. A row may be
/// shorter than the header row, in which case the missing trailing cells read
/// as empty strings through [`TokenizedCsv::cell`].
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TokenizedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TokenizedCsv {
    /// One `SourceColumn` per header, indexed by position.
    pub fn columns(&self) -> Vec<SourceColumn> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column_index, header)| SourceColumn {
                header: header.clone(),
                column_index,
            })
            .collect()
    }

    /// Cell at `column` in `row`, or `""` when the row is too short.
    pub fn cell(row: &[String], column: usize) -> &str {
        row.get(column).map(String::as_str).unwrap_or("")
    }
}

/// A header cell together with its stable position in the file.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SourceColumn {
    pub header: String,
    pub column_index: usize,
}

/// One source column and the field it currently feeds, if any.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct MappedColumn {
    pub column: SourceColumn,
    /// `None` means the column is ignored.
    pub field: Option<AssetField>,
}

/// Caller-editable association from source columns to target fields.
///
/// Entries are kept in column order. Nothing stops two columns from feeding
/// the same field; lookups by field resolve to the first such column.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    entries: Vec<MappedColumn>,
}

impl ColumnMapping {
    /// A mapping where every column is ignored.
    pub fn unmapped(columns: Vec<SourceColumn>) -> Self {
        Self {
            entries: columns
                .into_iter()
                .map(|column| MappedColumn {
                    column,
                    field: None,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[MappedColumn] {
        &self.entries
    }

    /// Field currently assigned to the first column titled `header`.
    pub fn field_for(&self, header: &str) -> Option<AssetField> {
        self.entries
            .iter()
            .find(|e| e.column.header == header)
            .and_then(|e| e.field)
    }

    /// Reassigns every column titled `header`. Returns `false` when no column
    /// carries that header.
    pub fn set(&mut self, header: &str, field: Option<AssetField>) -> bool {
        let mut found = false;
        for entry in self.entries.iter_mut().filter(|e| e.column.header == header) {
            entry.field = field;
            found = true;
        }
        found
    }

    /// Reassigns a single column by position. Returns `false` when out of range.
    pub fn set_column(&mut self, column_index: usize, field: Option<AssetField>) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|e| e.column.column_index == column_index)
        {
            Some(entry) => {
                entry.field = field;
                true
            }
            None => false,
        }
    }

    /// Position of the first column mapped to `field`.
    pub fn column_for(&self, field: AssetField) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.field == Some(field))
            .map(|e| e.column.column_index)
    }

    pub fn contains_field(&self, field: AssetField) -> bool {
        self.entries.iter().any(|e| e.field == Some(field))
    }

    /// Number of columns that feed some field.
    pub fn mapped_count(&self) -> usize {
        self.entries.iter().filter(|e| e.field.is_some()).count()
    }
}

/// A problem found in one data row.
///
/// `row` uses display numbering (first data row is 2). A row may collect
/// several errors; it is excluded from commit if it has at least one.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub row: usize,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(headers: &[&str]) -> ColumnMapping {
        let csv = TokenizedCsv {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: vec![],
        };
        ColumnMapping::unmapped(csv.columns())
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let row = vec!["a".to_string()];
        assert_eq!(TokenizedCsv::cell(&row, 0), "a");
        assert_eq!(TokenizedCsv::cell(&row, 3), "");
    }

    #[test]
    fn first_column_wins_when_fields_collide() {
        let mut m = mapping(&["Price", "Cost"]);
        m.set_column(0, Some(AssetField::Value));
        m.set_column(1, Some(AssetField::Value));
        assert_eq!(m.column_for(AssetField::Value), Some(0));
    }

    #[test]
    fn set_by_header_reports_unknown_headers() {
        let mut m = mapping(&["Name"]);
        assert!(m.set("Name", Some(AssetField::Name)));
        assert!(!m.set("Missing", Some(AssetField::Name)));
        assert_eq!(m.field_for("Name"), Some(AssetField::Name));
        assert_eq!(m.mapped_count(), 1);
    }

    #[test]
    fn set_by_header_updates_every_column_with_that_header() {
        let mut m = mapping(&["Name", "Qty", "Qty"]);
        assert!(m.set("Qty", Some(AssetField::Quantity)));
        let fields: Vec<_> = m.entries().iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![None, Some(AssetField::Quantity), Some(AssetField::Quantity)]
        );
        assert_eq!(m.column_for(AssetField::Quantity), Some(1));

        assert!(m.set("Qty", None));
        assert_eq!(m.mapped_count(), 0);
    }
}
