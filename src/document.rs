use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::GenError;

/// In-memory mapping from symbol to base64-encoded asset bytes, serialized
/// once at the end of a run.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct AssetDocument {
    entries: BTreeMap<char, String>,
}

impl AssetDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, symbol: char) -> Option<&str> {
        self.entries.get(&symbol).map(String::as_str)
    }

    /// Read the scratch file produced for `symbol` and store its base64
    /// encoding. After this call the entry equals the encoding of whatever
    /// bytes were at `scratch_path` at call time.
    pub fn record(&mut self, symbol: char, scratch_path: &Path) -> Result<(), GenError> {
        let bytes = fs::read(scratch_path).map_err(|source| GenError::AssetRead {
            symbol,
            path: scratch_path.to_path_buf(),
            source,
        })?;
        debug!("recorded {} bytes for '{}'", bytes.len(), symbol);
        self.entries.insert(symbol, STANDARD.encode(&bytes));
        Ok(())
    }

    /// Serialize the document as JSON to `dest`, overwriting any existing
    /// file. The write goes to a temporary file in the destination directory
    /// and is renamed into place, so a failed run never leaves a half-written
    /// destination behind.
    pub fn finalize(&self, dest: &Path) -> Result<(), GenError> {
        let json = serde_json::to_string(self).map_err(|e| GenError::Serialization {
            path: dest.to_path_buf(),
            source: Box::new(e),
        })?;

        let dir = dest.parent().filter(|p| !p.as_os_str().is_empty());
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
            .map_err(|e| GenError::Serialization {
                path: dest.to_path_buf(),
                source: Box::new(e),
            })?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| GenError::Serialization {
                path: dest.to_path_buf(),
                source: Box::new(e),
            })?;
        tmp.persist(dest).map_err(|e| GenError::Serialization {
            path: dest.to_path_buf(),
            source: Box::new(e),
        })?;

        info!("wrote {} entries to {}", self.len(), dest.display());
        Ok(())
    }
}
