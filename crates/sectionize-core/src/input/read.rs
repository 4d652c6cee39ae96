use sha2::{Digest, Sha256};
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::report::model::{SourceHash, SourceInfo};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read analysis document: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("analysis document is not valid JSON: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A loaded analysis document and the identity of the bytes it came from.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    /// Optional source path (informational only).
    pub path: Option<String>,

    /// Parsed document. Object key order matches the file.
    pub value: serde_json::Value,

    pub size_bytes: u64,

    /// Hash algorithm used for fingerprinting.
    pub hash_alg: String,

    /// Hex-encoded hash of the raw file bytes.
    pub hash_hex: String,
}

impl DocumentContext {
    /// Build a context from bytes already in memory.
    pub fn from_bytes(path: Option<&Path>, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        if !value.is_object() {
            debug!("analysis document root is not an object");
        }

        Ok(Self {
            path: path.map(|p| p.display().to_string()),
            value,
            size_bytes: bytes.len() as u64,
            hash_alg: "sha256".to_string(),
            hash_hex: fingerprint(bytes),
        })
    }

    /// Split into the parsed document and the report-facing source metadata.
    pub fn into_parts(self) -> (serde_json::Value, SourceInfo) {
        let source = SourceInfo {
            path: self.path,
            size_bytes: self.size_bytes,
            hash: SourceHash {
                algorithm: self.hash_alg,
                value: self.hash_hex,
            },
        };
        (self.value, source)
    }
}

/// Hex-encoded sha256 of `bytes`.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Read and parse an analysis document.
///
/// The fingerprint depends only on the file bytes, not on filesystem
/// metadata.
pub fn read_document(path: &Path) -> Result<DocumentContext, InputError> {
    let bytes = fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    DocumentContext::from_bytes(Some(path), &bytes).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
