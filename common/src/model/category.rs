use serde::{Deserialize, Serialize};

/// A node of the asset category taxonomy.
///
/// The import flow only ever creates these, for category ids it has not seen
/// before; it never edits a category the caller already owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    pub name: String,
    pub group: String,
}
