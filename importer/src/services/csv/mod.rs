//! The stages of the CSV asset import, each consuming the previous one's output.
//!
//! - `tokenize`: raw text into a header row and data rows.
//! - `mapping`: keyword-heuristic column-to-field suggestions and the
//!   required-field gate.
//! - `fields`: the typed setter registry used to write cells onto drafts.
//! - `validate`: per-row validation and coercion into preview records.
//! - `reconcile`: new categories for ids missing from the known taxonomy.
//! - `commit`: filtering out rejected rows and assigning identifiers.
//!
//! Stages are pure functions; sequencing and state live in `crate::pipeline`.

pub mod commit;
pub mod fields;
pub mod mapping;
pub mod reconcile;
pub mod tokenize;
pub mod validate;
