//! Tunables for an import run.
//!
//! Every field has a default, so callers usually start from
//! `ImportSettings::default()` and only override what they need, either in
//! code or from a JSON document such as `{"preview_sample_size": 10}`.

use crate::error::Result;
use serde::Deserialize;

/// 10 MB, same ceiling the upload endpoints have always accepted.
const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// How committed assets get their identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// `<unix-millis>-<index>`.
    #[default]
    Timestamp,
    /// Random v4 UUIDs.
    Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Group assigned to every category synthesized during reconciliation.
    pub imported_group: String,
    /// How many preview records `ImportPreview::sample` returns.
    pub preview_sample_size: usize,
    /// Files above this size are refused before decoding.
    pub max_file_bytes: u64,
    pub id_strategy: IdStrategy,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            imported_group: "Imported".to_string(),
            preview_sample_size: 5,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            id_strategy: IdStrategy::Timestamp,
        }
    }
}

impl ImportSettings {
    /// Parses settings from JSON; absent keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
