//! # Content Digests
//!
//! Fixed-size SHA-256 digests for attestation and certification
//! documents. The ledger never stores document content, only the digest
//! a caller supplies for it, plus the digests it computes itself over
//! short text fields (lot numbers at registration, recall reasons).
//!
//! Digests serialize as lowercase hex strings so persisted snapshots and
//! CLI output stay human-readable.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors raised when parsing a digest from hex.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DigestError {
    /// The hex string was not exactly 64 characters.
    #[error("digest hex must be 64 characters, got {0}")]
    BadLength(usize),

    /// The string contained a non-hex character.
    #[error("digest hex contains invalid character {0:?}")]
    BadCharacter(char),
}

/// A 32-byte SHA-256 content digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Digest of a UTF-8 text field.
    ///
    /// This is the path used for ledger-computed digests: the lot number
    /// at registration and the reason text on recall.
    pub fn of_text(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    /// Digest of raw bytes.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let hash = Sha256::digest(bytes);
        let mut out = [0u8; 32];
        out.copy_from_slice(&hash);
        Self(out)
    }

    /// Wrap a precomputed 32-byte digest supplied by a caller.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render as lowercase hex.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, DigestError> {
        if hex.len() != 64 {
            return Err(DigestError::BadLength(hex.len()));
        }
        let mut out = [0u8; 32];
        for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_value(chunk[0] as char)?;
            let lo = hex_value(chunk[1] as char)?;
            out[i] = (hi << 4) | lo;
        }
        Ok(Self(out))
    }
}

fn hex_value(c: char) -> Result<u8, DigestError> {
    c.to_digit(16)
        .map(|v| v as u8)
        .ok_or(DigestError::BadCharacter(c))
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentDigest({})", self.to_hex())
    }
}

impl Serialize for ContentDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(D::Error::custom)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sha256_vectors() {
        // Classic NIST vectors.
        assert_eq!(
            ContentDigest::of_text("").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            ContentDigest::of_text("abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_text_digest_depends_on_input() {
        assert_ne!(
            ContentDigest::of_text("LOT-100"),
            ContentDigest::of_text("LOT-101")
        );
    }

    #[test]
    fn test_text_digest_is_deterministic() {
        assert_eq!(
            ContentDigest::of_text("LOT-100"),
            ContentDigest::of_text("LOT-100")
        );
    }

    #[test]
    fn test_hex_roundtrip() {
        let digest = ContentDigest::of_text("round trip");
        let parsed = ContentDigest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn test_from_hex_rejects_bad_length() {
        assert_eq!(
            ContentDigest::from_hex("abcd").unwrap_err(),
            DigestError::BadLength(4)
        );
    }

    #[test]
    fn test_from_hex_rejects_bad_character() {
        let hex = "zz".repeat(32);
        assert_eq!(
            ContentDigest::from_hex(&hex).unwrap_err(),
            DigestError::BadCharacter('z')
        );
    }

    #[test]
    fn test_serde_as_hex_string() {
        let digest = ContentDigest::of_text("abc");
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(
            json,
            "\"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\""
        );
        let parsed: ContentDigest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        assert!(serde_json::from_str::<ContentDigest>("\"nope\"").is_err());
    }

    #[test]
    fn test_display_matches_hex() {
        let digest = ContentDigest::of_text("abc");
        assert_eq!(digest.to_string(), digest.to_hex());
    }
}
