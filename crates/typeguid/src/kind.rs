// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Kind tags for type descriptors
//!
//! The token written for every node of the type graph is the kind string
//! returned by [`Kind::as_str`]. These strings are part of the digest and
//! must never change, otherwise previously published GUIDs stop matching.

use std::fmt;

/// Coarse category of a described type.
///
/// Base kinds (bool, integers, floats, complex, string) contribute only their
/// kind token. Container kinds recurse into a single element type, maps into
/// a key and an element type, and named kinds (interface, struct) into their
/// fields and methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// Unset or unknown kind
    Invalid,

    // --- Base kinds ---
    Bool,
    /// Platform-sized signed integer (`isize`)
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    /// Platform-sized unsigned integer (`usize`)
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,

    // --- Single-element containers ---
    /// Fixed-length sequence (`[T; N]`)
    Array,
    /// Channel endpoint
    Chan,
    /// Owning or shared indirection (`Box<T>`, `Arc<T>`, `Option<T>`)
    Pointer,
    /// Variable-length sequence (`Vec<T>`, `[T]`)
    Slice,

    // --- Composite ---
    Map,
    Func,
    Interface,
    Struct,

    /// Raw untyped pointer, never hashable
    UnsafePointer,
}

impl Kind {
    /// Token emitted for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Uintptr => "uintptr",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Chan => "chan",
            Kind::Pointer => "ptr",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Func => "func",
            Kind::Interface => "interface",
            Kind::Struct => "struct",
            Kind::UnsafePointer => "unsafe.Pointer",
        }
    }

    /// Returns true for kinds fully determined by their kind token
    pub const fn is_base(self) -> bool {
        matches!(
            self,
            Kind::Bool
                | Kind::Int
                | Kind::Int8
                | Kind::Int16
                | Kind::Int32
                | Kind::Int64
                | Kind::Uint
                | Kind::Uint8
                | Kind::Uint16
                | Kind::Uint32
                | Kind::Uint64
                | Kind::Uintptr
                | Kind::Float32
                | Kind::Float64
                | Kind::Complex64
                | Kind::Complex128
                | Kind::String
        )
    }

    /// Returns true for kinds wrapping exactly one element type
    pub const fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Chan | Kind::Pointer | Kind::Slice)
    }

    /// Returns true for kinds whose simple name enters the digest
    pub const fn is_named(self) -> bool {
        matches!(self, Kind::Interface | Kind::Struct)
    }

    /// Returns true if the canonicalizer has a rule for this kind
    pub const fn is_supported(self) -> bool {
        self.is_base()
            || self.is_container()
            || self.is_named()
            || matches!(self, Kind::Map | Kind::Func)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
