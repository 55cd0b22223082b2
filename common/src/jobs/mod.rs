use serde::Serialize;
use std::fmt;

/// Where an import currently stands.
///
/// Stages only move forward: `Empty → Tokenized → Mapped → Previewed →
/// Committed`. Loading a new file or cancelling returns to `Empty`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ImportStage {
    Empty,
    Tokenized,
    Mapped,
    Previewed,
    Committed,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImportStage::Empty => "empty",
            ImportStage::Tokenized => "tokenized",
            ImportStage::Mapped => "mapped",
            ImportStage::Previewed => "previewed",
            ImportStage::Committed => "committed",
        };
        f.write_str(label)
    }
}
