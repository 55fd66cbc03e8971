// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # typeguid - structural fingerprints for type contracts
//!
//! Computes a deterministic SHA-256 fingerprint ("GUID") of a type's
//! *structure*: kind, field names and types, method names and signatures,
//! recursively expanded through every referenced type. Two independently
//! built programs exchange their GUIDs out-of-band and proceed with
//! serialized communication only when they match.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use typeguid::{Describe, interface};
//!
//! #[derive(Describe)]
//! struct Reading {
//!     channel: u8,
//!     value: f64,
//! }
//!
//! #[interface]
//! trait Sensor {
//!     fn read(&self, channel: u8) -> Reading;
//!     fn channels(&self) -> Vec<u8>;
//! }
//!
//! let guid = typeguid::calculate::<dyn Sensor>()?;
//! assert_eq!(guid.to_string().len(), 64);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller -> GuidCalculator -> Canonicalizer -> TokenSink (SHA-256)
//!                                  |
//!                                  v
//!                             TypeRegistry  <- Describe impls / proc macros
//! ```
//!
//! ## What the digest depends on
//!
//! - kind of every node, names of interfaces and structs (including the
//!   outermost one, see [`RootName`]), field names in declaration order,
//!   method names in sorted order, parameter and result types
//! - not on method declaration order, not on field visibility, not on
//!   function signatures unless [`FuncSignatures::Expand`] is set
//!
//! Cycles are cut by name: once an interface or struct name has been
//! expanded during a call, further references to it emit only its kind and
//! name.

// Allow the derive macro to work inside this crate's tests
extern crate self as typeguid;

/// GUID calculator entry points.
pub mod calculator;
/// Canonical token stream construction.
mod canon;
/// Constants and calculator settings.
pub mod config;
/// Type descriptor provider (registry, `Describe`, `MethodSet`).
pub mod descriptor;
/// Error types.
pub mod error;
/// The `Guid` digest type.
pub mod guid;
/// Kind tags.
pub mod kind;

pub use calculator::{calculate, calculate_with, GuidCalculator};
pub use config::{FuncSignatures, GuidConfig, RootName};
pub use descriptor::{
    Describe, Field, Method, MethodSet, Signature, TypeDescriptor, TypeRef, TypeRegistry,
};
pub use error::{GuidError, ParseGuidError, Result};
pub use guid::Guid;
pub use kind::Kind;

pub use typeguid_codegen::{interface, method_set, Describe}; // Proc macros
