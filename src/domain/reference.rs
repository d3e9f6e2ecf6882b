//! Task bundle reference domain types
//!
//! A bundle reference is a pinned image like
//! `quay.io/konflux-ci/tekton-catalog/buildah:0.1@sha256:<hex>`. Its identity
//! is the `(task_name, tag)` pair; the digest is the part that gets refreshed.

use std::collections::HashMap;
use std::fmt;

use crate::error::RegistryError;

const SHA256_PREFIX: &str = "sha256:";
const SHA256_HEX_LEN: usize = 64;

/// Identity of a bundle reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceKey {
    pub task_name: String,
    pub tag: String,
}

impl ReferenceKey {
    pub fn new(task_name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            tag: tag.into(),
        }
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.task_name, self.tag)
    }
}

/// A sha256 manifest digest, stored as lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    /// Parse a digest as the registry reports it
    ///
    /// Accepts `sha256:<hex>` or bare `<hex>`. The hex part must be exactly
    /// 64 lowercase hex characters so a rewritten reference still matches the
    /// reference pattern on the next run.
    pub fn parse(value: &str) -> Result<Self, RegistryError> {
        let hex = value.strip_prefix(SHA256_PREFIX).unwrap_or(value);
        let valid = hex.len() == SHA256_HEX_LEN
            && hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));

        if !valid {
            return Err(RegistryError::MalformedDigest {
                value: value.to_string(),
            });
        }

        Ok(Self(hex.to_string()))
    }

    /// Wrap hex already matched out of a pipeline file
    pub(crate) fn from_matched_hex(hex: &str) -> Self {
        Self(hex.to_string())
    }

    pub fn hex(&self) -> &str {
        &self.0
    }

    /// Short form for console output (e.g., "sha256:0123456789ab")
    pub fn short(&self) -> String {
        let hex = self.hex();
        format!("{}{}", SHA256_PREFIX, &hex[..12.min(hex.len())])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SHA256_PREFIX, self.0)
    }
}

/// One occurrence of a bundle reference in a pipeline file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReference {
    pub key: ReferenceKey,
    pub digest: Digest,
}

/// Freshly resolved digests, keyed by reference identity
pub type ResolutionTable = HashMap<ReferenceKey, Digest>;

/// A single occurrence whose digest a rewrite changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestChange {
    pub key: ReferenceKey,
    pub old: Digest,
    pub new: Digest,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(c: char) -> String {
        std::iter::repeat(c).take(64).collect()
    }

    #[test]
    fn test_reference_key_display() {
        assert_eq!(ReferenceKey::new("buildah", "0.1").to_string(), "buildah:0.1");
    }

    #[test]
    fn test_digest_parse_prefixed_and_bare() {
        let prefixed = Digest::parse(&format!("sha256:{}", hex('b'))).unwrap();
        let bare = Digest::parse(&hex('b')).unwrap();
        assert_eq!(prefixed, bare);
        assert_eq!(prefixed.to_string(), format!("sha256:{}", hex('b')));
        assert_eq!(prefixed.short(), "sha256:bbbbbbbbbbbb");
    }

    #[test]
    fn test_digest_parse_rejects_malformed() {
        assert!(Digest::parse("").is_err());
        assert!(Digest::parse("sha256:abc").is_err());
        assert!(Digest::parse(&format!("sha256:{}", hex('B'))).is_err());
        assert!(Digest::parse(&format!("sha512:{}", hex('a'))).is_err());
    }
}
