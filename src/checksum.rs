//! Checksum utilities for shape fingerprinting
//!
//! Every finalized shape gets a SHA256 fingerprint over its canonical
//! JSON encoding. Manifests combine them so two builds of the same
//! catalog can be compared without walking every shape.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA256 checksum of a canonical shape encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum from a string
    pub fn from_content(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    /// Compute checksum from a serializable value (canonical JSON encoding)
    pub fn from_canonical<T: Serialize>(value: &T) -> Self {
        let canonical = serde_json::to_string(value).unwrap_or_default();
        Self::from_content(&canonical)
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify that content matches this checksum
    pub fn verify(&self, content: &str) -> bool {
        let computed = Self::from_content(content);
        self.0 == computed.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Checksum {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Checksum {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistency() {
        let content = r#"{"name": "Address", "fields": 3}"#;
        let checksum1 = Checksum::from_content(content);
        let checksum2 = Checksum::from_content(content);
        assert_eq!(checksum1, checksum2);
    }

    #[test]
    fn test_checksum_different_content() {
        let checksum1 = Checksum::from_content(r#"{"name": "Address"}"#);
        let checksum2 = Checksum::from_content(r#"{"name": "Location"}"#);
        assert_ne!(checksum1, checksum2);
    }

    #[test]
    fn test_checksum_verification() {
        let content = r#"{"name": "Device"}"#;
        let checksum = Checksum::from_content(content);
        assert!(checksum.verify(content));
        assert!(!checksum.verify("different content"));
    }
}
