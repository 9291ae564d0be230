//! Signature domain separation tag

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::BlsError;

/// 32-byte tag mixed into every hashed message, so that a signature made for
/// one rollup deployment is meaningless on another.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Domain([u8; 32]);

impl Domain {
    /// Length of a domain in bytes
    pub const LEN: usize = 32;

    /// Wrap 32 bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Copy a domain out of a slice of exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, BlsError> {
        let bytes: [u8; 32] =
            bytes.try_into().map_err(|_| BlsError::InvalidDomainLength(bytes.len()))?;
        Ok(Self(bytes))
    }

    /// Raw bytes
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Domain {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Domain {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Domain {
    type Err = BlsError;

    /// Parse 64 hex characters, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| BlsError::InvalidDomainHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain({self})")
    }
}

impl Serialize for Domain {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Domain {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
