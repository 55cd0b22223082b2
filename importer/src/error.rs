//! Blocking failures of the import pipeline.
//!
//! Only structural problems (nothing to read, nothing to tokenize), the
//! mapping gate and misuse of the stage machine surface as `Err`. Problems in
//! individual rows are data: they are collected as
//! `common::model::csv::ValidationError`s and excluded at commit.

use common::jobs::ImportStage;
use common::model::schema::AssetField;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file is empty or invalid.")]
    EmptyInput,

    #[error("Failed to read the file.")]
    Unreadable(#[source] std::io::Error),

    #[error("The file must end with .csv (got '{0}')")]
    UnsupportedFile(String),

    #[error("The file is {size} bytes, above the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Please map the following required fields: {}", join_fields(.0))]
    MissingMappings(Vec<AssetField>),

    #[error("No column titled '{0}'")]
    UnknownHeader(String),

    #[error("Cannot {action} while the import is {stage}")]
    InvalidTransition {
        action: &'static str,
        stage: ImportStage,
    },

    #[error("Invalid import settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;

fn join_fields(fields: &[AssetField]) -> String {
    fields
        .iter()
        .map(AssetField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
