use common::model::csv::{ColumnMapping, SourceColumn};
use common::model::schema::{AssetField, TargetSchema};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]").unwrap());

/// Lower-cases and removes whitespace, `-` and `_`, so `"Purchase_Price"`
/// and `"purchase price"` compare equal.
pub(crate) fn normalize_header(header: &str) -> String {
    SEPARATORS.replace_all(&header.to_lowercase(), "").into_owned()
}

/// Best-effort field for a header: the first schema field with a keyword
/// contained in the normalized header.
pub fn suggest_field(schema: &TargetSchema, header: &str) -> Option<AssetField> {
    let normalized = normalize_header(header);
    schema
        .fields()
        .iter()
        .find(|descriptor| {
            descriptor
                .suggestions
                .iter()
                .any(|keyword| normalized.contains(&normalize_header(keyword)))
        })
        .map(|descriptor| descriptor.field)
}

/// Builds the default mapping for a set of columns. Columns nothing matches
/// stay unmapped.
pub fn suggest_mappings(schema: &TargetSchema, columns: Vec<SourceColumn>) -> ColumnMapping {
    let mut mapping = ColumnMapping::unmapped(columns);
    let suggestions: Vec<(usize, Option<AssetField>)> = mapping
        .entries()
        .iter()
        .map(|e| (e.column.column_index, suggest_field(schema, &e.column.header)))
        .collect();
    for (column_index, field) in suggestions {
        mapping.set_column(column_index, field);
    }
    debug!(
        "suggested mappings for {} of {} columns",
        mapping.mapped_count(),
        mapping.entries().len()
    );
    mapping
}

/// Required fields with no column feeding them, as `name, value, categoryId`.
pub fn missing_required(schema: &TargetSchema, mapping: &ColumnMapping) -> Vec<AssetField> {
    schema
        .required()
        .filter(|field| !mapping.contains_field(*field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::csv::TokenizedCsv;

    fn columns(headers: &[&str]) -> Vec<SourceColumn> {
        TokenizedCsv {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: vec![],
        }
        .columns()
    }

    #[test]
    fn normalization_strips_separators() {
        assert_eq!(normalize_header(" Purchase_Price-USD "), "purchasepriceusd");
    }

    #[test]
    fn common_headers_map_to_their_fields() {
        let schema = TargetSchema::assets();
        assert_eq!(suggest_field(&schema, "Item Name"), Some(AssetField::Name));
        assert_eq!(suggest_field(&schema, "Cost"), Some(AssetField::Value));
        assert_eq!(suggest_field(&schema, "Cat"), Some(AssetField::CategoryId));
        assert_eq!(suggest_field(&schema, "QTY"), Some(AssetField::Quantity));
        assert_eq!(suggest_field(&schema, "token_id"), Some(AssetField::TokenId));
        assert_eq!(suggest_field(&schema, "Bought On"), Some(AssetField::PurchaseDate));
    }

    #[test]
    fn earlier_fields_win_keyword_overlaps() {
        let schema = TargetSchema::assets();
        // "price" is a value keyword and value is declared before purchasePrice.
        assert_eq!(suggest_field(&schema, "Purchase Price"), Some(AssetField::Value));
    }

    #[test]
    fn unmatched_headers_stay_unmapped() {
        let schema = TargetSchema::assets();
        let mapping = suggest_mappings(&schema, columns(&["Name", "Zzz"]));
        assert_eq!(mapping.field_for("Name"), Some(AssetField::Name));
        assert_eq!(mapping.field_for("Zzz"), None);
    }

    #[test]
    fn gate_lists_every_missing_required_field() {
        let schema = TargetSchema::assets();
        let mapping = suggest_mappings(&schema, columns(&["Name", "Zzz"]));
        assert_eq!(
            missing_required(&schema, &mapping),
            vec![AssetField::Value, AssetField::CategoryId]
        );
    }
}
