use common::model::category::CategoryRecord;
use log::info;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;

static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").unwrap());

/// Turns a category id into a display name: `-` and `_` become spaces and the
/// first letter of each word is upper-cased (`"real-estate"` → `"Real Estate"`).
pub fn humanize(id: &str) -> String {
    let spaced = id.replace(['-', '_'], " ");
    WORD_START
        .replace_all(&spaced, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

/// Synthesizes a category for every referenced id the caller does not know.
///
/// Output follows the order of `referenced`, which the validator keeps in
/// first-occurrence order. Known categories are never touched and empty ids
/// never produce a record.
pub fn reconcile_categories(
    referenced: &[String],
    known: &[CategoryRecord],
    group: &str,
) -> Vec<CategoryRecord> {
    let known_ids: HashSet<&str> = known.iter().map(|c| c.id.as_str()).collect();
    let mut emitted = HashSet::new();

    let created: Vec<CategoryRecord> = referenced
        .iter()
        .filter(|id| !id.is_empty() && !known_ids.contains(id.as_str()))
        .filter(|id| emitted.insert((*id).clone()))
        .map(|id| CategoryRecord {
            id: id.clone(),
            name: humanize(id),
            group: group.to_string(),
        })
        .collect();

    if !created.is_empty() {
        info!(
            "{} new categories will be created under '{}'",
            created.len(),
            group
        );
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(ids: &[&str]) -> Vec<CategoryRecord> {
        ids.iter()
            .map(|id| CategoryRecord {
                id: id.to_string(),
                name: id.to_string(),
                group: "Finance".to_string(),
            })
            .collect()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn humanize_title_cases_words() {
        assert_eq!(humanize("gadgets"), "Gadgets");
        assert_eq!(humanize("real-estate"), "Real Estate");
        assert_eq!(humanize("digital_art-nft"), "Digital Art Nft");
        assert_eq!(humanize("s&p500"), "S&P500");
    }

    #[test]
    fn only_unknown_ids_become_categories() {
        let created = reconcile_categories(
            &ids(&["stocks", "fine-wine", "gadgets"]),
            &known(&["stocks"]),
            "Imported",
        );
        let created_ids: Vec<_> = created.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(created_ids, vec!["fine-wine", "gadgets"]);
        assert!(created.iter().all(|c| c.group == "Imported"));
        assert_eq!(created[0].name, "Fine Wine");
    }

    #[test]
    fn reconciling_twice_creates_nothing_new() {
        let referenced = ids(&["a", "b"]);
        let first = reconcile_categories(&referenced, &[], "Imported");
        let second = reconcile_categories(&referenced, &first, "Imported");
        assert!(second.is_empty());
    }

    #[test]
    fn duplicates_and_empty_ids_are_ignored() {
        let created = reconcile_categories(&ids(&["a", "", "a"]), &[], "Imported");
        assert_eq!(created.len(), 1);
    }
}
