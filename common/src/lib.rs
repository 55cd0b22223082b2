//! Data model shared between the CSV asset importer and its callers.
//!
//! - `model`: the target schema registry, asset and category records, and the
//!   tokenized-file and column-mapping shapes the pipeline passes around.
//! - `jobs`: the import stage enum.
//! - `requests`: payloads a caller sends to edit an in-flight import.

pub mod jobs;
pub mod model;
pub mod requests;
