// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for GUID calculation and parsing.

use crate::kind::Kind;
use thiserror::Error;

/// Failure while canonicalizing a type graph.
///
/// Both variants abort the calculation: no partial or default digest is ever
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuidError {
    /// The graph reaches a kind the canonicalizer has no rule for.
    #[error("do not know how to handle kind {kind} (type {name:?})")]
    UnsupportedKind {
        /// Offending kind.
        kind: Kind,
        /// Simple name of the offending node, possibly empty.
        name: String,
    },
    /// A registered node lacks a component its kind requires.
    #[error("incomplete {kind} descriptor {name:?}: missing {missing}")]
    IncompleteDescriptor {
        kind: Kind,
        name: String,
        /// Component that was never set (`"element"`, `"key"`, `"signature"`).
        missing: &'static str,
    },
}

/// Failure while parsing a hex-encoded GUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseGuidError {
    #[error("expected 64 hex digits, got {0} bytes")]
    InvalidLength(usize),
    #[error("invalid hex digit at position {index}")]
    InvalidDigit { index: usize },
}

/// Result alias for calculator operations.
pub type Result<T> = std::result::Result<T, GuidError>;
