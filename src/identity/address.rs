use crate::identity::PublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of bytes in an address
pub const IDENTITY_LEN: usize = 20;

const HEX_PREFIX: &str = "0x";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Invalid identity format: {0}")]
    InvalidFormat(String),

    #[error("Invalid identity length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid hex encoding: {0}")]
    InvalidHex(String),
}

/// Participant address: 20 bytes, rendered as `0x` + lowercase hex.
///
/// Equality is byte equality, so two textual forms that differ only in
/// letter case parse to the same identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    /// Derive an address from a public key (trailing 20 bytes of its SHA-256)
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let digest = Sha256::digest(public_key.as_bytes());
        let mut bytes = [0u8; IDENTITY_LEN];
        bytes.copy_from_slice(&digest[digest.len() - IDENTITY_LEN..]);
        Self(bytes)
    }

    /// Generate a random identity
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut bytes = [0u8; IDENTITY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parse `0x`-prefixed or bare hex, in any letter case
    pub fn parse(s: &str) -> Result<Self, IdentityError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::InvalidFormat("identity cannot be empty".into()));
        }

        let digits = trimmed
            .strip_prefix(HEX_PREFIX)
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let decoded = hex::decode(digits).map_err(|e| IdentityError::InvalidHex(e.to_string()))?;

        let bytes: [u8; IDENTITY_LEN] =
            decoded
                .as_slice()
                .try_into()
                .map_err(|_| IdentityError::InvalidLength {
                    expected: IDENTITY_LEN,
                    got: decoded.len(),
                })?;

        Ok(Self(bytes))
    }

    /// Abbreviated form for display, e.g. `0x1a2b…9f0e`
    pub fn short(&self) -> String {
        let full = hex::encode(self.0);
        format!("{}{}…{}", HEX_PREFIX, &full[..4], &full[full.len() - 4..])
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", HEX_PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Identity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Identity::parse(&s).map_err(serde::de::Error::custom)
    }
}
