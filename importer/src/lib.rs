//! CSV asset importer.
//!
//! Reconciles a loosely-structured CSV file against the asset schema defined
//! in `common::model::schema`, producing validated assets plus any categories
//! the file references that the caller does not know yet.
//!
//! A caller drives one `ImportPipeline` per import:
//!
//! ```no_run
//! # async fn run(known: Vec<common::model::category::CategoryRecord>) -> importer::Result<()> {
//! use importer::ImportPipeline;
//!
//! let mut pipeline = ImportPipeline::default();
//! pipeline.load_file("holdings.csv").await?;
//! pipeline.suggest_mappings()?;
//! // let the user review `pipeline.mapping()` and call `set_mapping` as needed
//! pipeline.preview(&known)?;
//! let outcome = pipeline.commit()?;
//! // append `outcome.assets` and `outcome.categories` to the stores
//! # Ok(())
//! # }
//! ```
//!
//! The individual stages live in `services::csv` and can be used on their own.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod services;
pub mod source;

pub use config::{IdStrategy, ImportSettings};
pub use error::{ImportError, Result};
pub use pipeline::{ImportPipeline, ImportPreview};
pub use services::csv::commit::{IdSource, ImportOutcome};
pub use source::{read_source, SourceFile};
