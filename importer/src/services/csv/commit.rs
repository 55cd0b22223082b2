use crate::config::IdStrategy;
use common::model::asset::{Asset, PreviewRecord};
use common::model::category::CategoryRecord;
use common::model::csv::ValidationError;
use log::{info, warn};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Hands out identifiers for committed assets.
pub trait IdSource {
    /// Identifier for the asset at `index` in the committed batch.
    fn next_id(&mut self, index: usize) -> String;
}

/// `<unix-millis>-<index>`, with the timestamp taken once per batch.
pub struct TimestampIdSource {
    millis: u128,
}

impl TimestampIdSource {
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        Self { millis }
    }
}

impl IdSource for TimestampIdSource {
    fn next_id(&mut self, index: usize) -> String {
        format!("{}-{}", self.millis, index)
    }
}

pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&mut self, _index: usize) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

pub fn id_source_for(strategy: IdStrategy) -> Box<dyn IdSource> {
    match strategy {
        IdStrategy::Timestamp => Box::new(TimestampIdSource::now()),
        IdStrategy::Uuid => Box::new(UuidIdSource),
    }
}

/// The importable result of a run, ready for the caller to append.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub assets: Vec<Asset>,
    pub categories: Vec<CategoryRecord>,
}

/// Drops every record whose row has an error and finalizes the rest.
///
/// Surviving records get an id from `ids`, numbered by their position among
/// the survivors, and an empty description when none was mapped. Categories
/// pass through unchanged.
pub fn commit_records(
    records: &[PreviewRecord],
    errors: &[ValidationError],
    categories: &[CategoryRecord],
    ids: &mut dyn IdSource,
) -> ImportOutcome {
    let rejected_rows: HashSet<usize> = errors.iter().map(|e| e.row).collect();

    let mut assets = Vec::with_capacity(records.len().saturating_sub(rejected_rows.len()));
    for record in records.iter().filter(|r| !rejected_rows.contains(&r.row)) {
        let id = ids.next_id(assets.len());
        match record.draft.clone().into_asset(id) {
            Some(asset) => assets.push(asset),
            None => warn!("row {} has no errors but is incomplete; skipped", record.row),
        }
    }

    info!(
        "committing {} assets ({} rows rejected) and {} new categories",
        assets.len(),
        rejected_rows.len(),
        categories.len()
    );
    ImportOutcome {
        assets,
        categories: categories.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::asset::AssetDraft;

    struct Sequential;

    impl IdSource for Sequential {
        fn next_id(&mut self, index: usize) -> String {
            format!("asset-{index}")
        }
    }

    fn valid(row: usize, name: &str) -> PreviewRecord {
        PreviewRecord {
            row,
            draft: AssetDraft {
                name: Some(name.to_string()),
                value: Some(1.0),
                category_id: Some("stocks".to_string()),
                ..AssetDraft::default()
            },
        }
    }

    #[test]
    fn rows_with_errors_are_dropped() {
        let records = vec![valid(2, "a"), valid(3, "b"), valid(4, "c")];
        let errors = vec![
            ValidationError {
                row: 3,
                message: "Name is missing.".to_string(),
            },
            ValidationError {
                row: 3,
                message: "Category ID is missing.".to_string(),
            },
        ];
        let outcome = commit_records(&records, &errors, &[], &mut Sequential);
        let names: Vec<_> = outcome.assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        let ids: Vec<_> = outcome.assets.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["asset-0", "asset-1"]);
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let outcome = commit_records(&[valid(2, "a")], &[], &[], &mut Sequential);
        assert_eq!(outcome.assets[0].description, "");
    }

    #[test]
    fn timestamp_ids_are_unique_within_a_batch() {
        let mut ids = TimestampIdSource::now();
        let first = ids.next_id(0);
        let second = ids.next_id(1);
        assert_ne!(first, second);
        assert!(first.ends_with("-0"));
    }

    #[test]
    fn uuid_ids_differ() {
        let mut ids = UuidIdSource;
        assert_ne!(ids.next_id(0), ids.next_id(0));
    }
}
