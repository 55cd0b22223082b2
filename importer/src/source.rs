//! Acquisition of the file to import.
//!
//! This is the only asynchronous step of an import: the whole file is read
//! into memory once, then every later stage runs synchronously on the text.
//! The raw bytes are fingerprinted with MD5 so callers can recognise a file
//! they have already imported.

use crate::config::ImportSettings;
use crate::error::{ImportError, Result};
use log::{info, warn};
use md5::Context;
use std::path::Path;

/// A file read into memory and decoded to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: String,
    /// Lower-case hex MD5 of the raw bytes.
    pub md5: String,
    pub text: String,
}

impl SourceFile {
    /// Wraps bytes obtained elsewhere (e.g. an upload) the same way
    /// `read_source` wraps a file on disk.
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        let file_name = file_name.into();
        let mut hasher = Context::new();
        hasher.consume(bytes);
        let md5 = format!("{:x}", hasher.finalize());

        let text = match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => {
                warn!("{} is not valid UTF-8; decoding lossily", file_name);
                String::from_utf8_lossy(bytes).into_owned()
            }
        };
        let text = match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        };

        Self {
            file_name,
            md5,
            text,
        }
    }
}

fn check_size(size: u64, settings: &ImportSettings) -> Result<()> {
    if size > settings.max_file_bytes {
        return Err(ImportError::FileTooLarge {
            size,
            limit: settings.max_file_bytes,
        });
    }
    Ok(())
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Reads a `.csv` file from disk.
///
/// # Errors
/// - `UnsupportedFile` when the name does not end in `.csv`.
/// - `FileTooLarge` when the file exceeds `settings.max_file_bytes`.
/// - `Unreadable` for any I/O failure.
pub async fn read_source(path: impl AsRef<Path>, settings: &ImportSettings) -> Result<SourceFile> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !has_csv_extension(path) {
        return Err(ImportError::UnsupportedFile(file_name));
    }

    let size = tokio::fs::metadata(path)
        .await
        .map_err(ImportError::Unreadable)?
        .len();
    check_size(size, settings)?;

    let bytes = tokio::fs::read(path).await.map_err(ImportError::Unreadable)?;
    // The file may have grown since the metadata call.
    check_size(bytes.len() as u64, settings)?;
    let source = SourceFile::from_bytes(file_name, &bytes);
    info!(
        "read {} ({} bytes, md5 {})",
        source.file_name,
        bytes.len(),
        source.md5
    );
    Ok(source)
}
