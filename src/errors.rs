use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort an asset generation run.
///
/// All of these are fatal: the run stops at the first failure, nothing is
/// retried, and the destination document is only ever written after every
/// symbol succeeded.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("asset generation failed for symbol '{symbol}': {reason}")]
    ToolInvocation { symbol: char, reason: String },

    #[error("no asset was produced for symbol '{symbol}': expected {}", path.display())]
    MissingAsset { symbol: char, path: PathBuf },

    #[error("failed to read asset for symbol '{symbol}' from {}", path.display())]
    AssetRead {
        symbol: char,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output document to {}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl GenError {
    pub(crate) fn tool(symbol: char, reason: impl Into<String>) -> Self {
        Self::ToolInvocation {
            symbol,
            reason: reason.into(),
        }
    }
}
