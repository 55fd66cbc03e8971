// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! typeguid configuration - single source of truth
//!
//! Wire-level constants of the canonical token stream live here, together
//! with [`GuidConfig`], the only runtime knob set of the calculator.
//! **Never hardcode the delimiter or the marker elsewhere!**
//!
//! # Compatibility
//!
//! `GuidConfig::default()` reproduces the digests published by earlier
//! deployments. Any other setting yields a different digest family: both
//! parties of a handshake must agree on the configuration, not only on the
//! type.
//!
//! ```ignore
//! use typeguid::{GuidCalculator, GuidConfig};
//!
//! let calc = GuidCalculator::with_config(&registry, GuidConfig::strict());
//! let guid = calc.calculate(root)?;
//! ```

/// Byte written after every token so that `"ab" + "c"` and `"a" + "bc"`
/// hash differently.
pub const TOKEN_DELIMITER: u8 = 0;

/// Token emitted for a container whose element is the container itself
/// (`type T *T`).
pub const SELF_REFERENCE_MARKER: &str = "*";

/// Digest length in bytes (SHA-256).
pub const GUID_LEN: usize = 32;

/// Length of the hex rendering of a digest.
pub const GUID_HEX_LEN: usize = GUID_LEN * 2;

/// How function-typed nodes contribute to the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FuncSignatures {
    /// Only the `func` kind token is written. Two different signatures hash
    /// identically; kept for compatibility with published digests.
    #[default]
    Opaque,
    /// Parameter then result types are expanded like a method signature.
    Expand,
}

/// Whether the simple name of the outermost interface/struct is hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RootName {
    /// The root name is written like every other interface/struct name.
    #[default]
    Include,
    /// An empty name token is written for the root; the real name is still
    /// recorded in the visited set so cycles back to the root terminate.
    Omit,
}

/// Calculator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GuidConfig {
    pub func_signatures: FuncSignatures,
    pub root_name: RootName,
}

impl GuidConfig {
    /// Settings producing the published digest family.
    pub const fn compatible() -> Self {
        Self {
            func_signatures: FuncSignatures::Opaque,
            root_name: RootName::Include,
        }
    }

    /// Compatible settings with function signatures expanded.
    pub const fn strict() -> Self {
        Self {
            func_signatures: FuncSignatures::Expand,
            root_name: RootName::Include,
        }
    }

    #[must_use]
    pub const fn func_signatures(mut self, mode: FuncSignatures) -> Self {
        self.func_signatures = mode;
        self
    }

    #[must_use]
    pub const fn root_name(mut self, mode: RootName) -> Self {
        self.root_name = mode;
        self
    }

    /// Returns true if this configuration yields the published digest family.
    pub const fn is_compatible(&self) -> bool {
        matches!(self.func_signatures, FuncSignatures::Opaque)
            && matches!(self.root_name, RootName::Include)
    }
}
