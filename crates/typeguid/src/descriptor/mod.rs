// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptor provider.
//!
//! A [`TypeRegistry`] holds the type graph the canonicalizer walks. Nodes
//! are registered by hand, through [`Describe`] impls, or by the
//! `#[derive(Describe)]`, `#[interface]` and `#[method_set]` macros, which
//! emit exactly what a reflective runtime would report: kind, simple name,
//! fields in declaration order, methods sorted by name, element/key types
//! and signatures without receivers.

mod describe;
mod model;
mod registry;

pub use describe::{results_of, Describe, MethodSet};
pub use model::{Field, Method, Signature, TypeDescriptor, TypeRef};
pub use registry::TypeRegistry;

#[cfg(test)]
mod tests;
