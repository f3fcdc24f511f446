//! Contract snapshot versioning

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A versioned snapshot of the contract catalog
///
/// Each snapshot captures the whole domain model at one point in time;
/// snapshots are never edited, only superseded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractVersion {
    /// Semantic version (e.g., "2.0.0")
    pub version: Version,
    /// When this snapshot was frozen
    pub frozen_at: Option<DateTime<Utc>>,
    /// Release notes for this snapshot
    pub notes: Option<String>,
    /// The snapshot this one supersedes
    pub previous_version: Option<String>,
}

impl ContractVersion {
    /// Create a new contract version
    pub fn new(version: Version) -> Self {
        Self {
            version,
            frozen_at: None,
            notes: None,
            previous_version: None,
        }
    }

    /// Create from a version string
    pub fn parse(version_str: &str) -> Result<Self, semver::Error> {
        // Strip leading 'v' if present
        let version_str = version_str.strip_prefix('v').unwrap_or(version_str);
        let version = Version::parse(version_str)?;
        Ok(Self::new(version))
    }

    /// Get the version string (e.g., "2.0.0")
    pub fn version_string(&self) -> String {
        self.version.to_string()
    }

    /// Get the tag string (e.g., "v2.0.0")
    pub fn tag_string(&self) -> String {
        format!("v{}", self.version)
    }

    /// Check if this is a major version bump from another version
    pub fn is_major_bump_from(&self, other: &ContractVersion) -> bool {
        self.version.major > other.version.major
    }
}

impl fmt::Display for ContractVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)
    }
}

impl PartialEq for ContractVersion {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
    }
}

impl Eq for ContractVersion {}

impl PartialOrd for ContractVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContractVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.version.cmp(&other.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parsing() {
        let v = ContractVersion::parse("1.0.0").unwrap();
        assert_eq!(v.version_string(), "1.0.0");
        assert_eq!(v.tag_string(), "v1.0.0");
    }

    #[test]
    fn test_version_with_v_prefix() {
        let v = ContractVersion::parse("v2.0.0").unwrap();
        assert_eq!(v.version_string(), "2.0.0");
    }

    #[test]
    fn test_version_ordering() {
        let v1 = ContractVersion::parse("1.0.0").unwrap();
        let v2 = ContractVersion::parse("2.0.0").unwrap();
        assert!(v1 < v2);
        assert!(v2.is_major_bump_from(&v1));
    }
}
