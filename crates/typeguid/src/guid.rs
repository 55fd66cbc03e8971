// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural GUID: a SHA-256 digest of a canonical token stream.

use crate::config::{GUID_HEX_LEN, GUID_LEN};
use crate::error::ParseGuidError;
use std::fmt;
use std::str::FromStr;

/// Guid - 32-byte structural fingerprint of a type
///
/// Two programs agree on a contract if and only if the GUIDs they computed
/// independently for it are bit-identical. The canonical text form is the
/// lowercase hex rendering returned by `Display`.
///
/// # Example
///
/// ```ignore
/// use typeguid::Guid;
///
/// let guid = typeguid::calculate::<dyn Sensor>()?;
/// let remote: Guid = announced_hex.parse()?;
/// if guid != remote {
///     return Err(HandshakeError::ContractMismatch);
/// }
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guid([u8; GUID_LEN]);

impl Guid {
    /// Create from raw 32-byte array
    pub const fn from_bytes(bytes: [u8; GUID_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw 32-byte array
    pub const fn as_bytes(&self) -> &[u8; GUID_LEN] {
        &self.0
    }

    /// Lowercase hex rendering (64 characters)
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({self})")
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for Guid {
    type Err = ParseGuidError;

    /// Accepts exactly 64 hex digits, upper or lower case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != GUID_HEX_LEN {
            return Err(ParseGuidError::InvalidLength(s.len()));
        }

        let mut bytes = [0u8; GUID_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { index, .. } => {
                ParseGuidError::InvalidDigit { index }
            }
            _ => ParseGuidError::InvalidLength(s.len()),
        })?;
        Ok(Self(bytes))
    }
}

impl From<[u8; GUID_LEN]> for Guid {
    fn from(bytes: [u8; GUID_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for Guid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Guid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Guid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
