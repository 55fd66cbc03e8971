// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Descriptor nodes stored in a [`TypeRegistry`](super::TypeRegistry).

use crate::kind::Kind;
use std::fmt;

/// Handle to a node of a [`TypeRegistry`](super::TypeRegistry).
///
/// Two handles are equal if and only if they designate the same node, which
/// is what the self-referential container rule compares.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(pub(super) u32);

impl TypeRef {
    /// Position of the node in its registry.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self.0)
    }
}

/// Named member of a struct, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered parameter and result types of a callable. Receivers are never
/// part of a signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<TypeRef>,
    pub results: Vec<TypeRef>,
}

impl Signature {
    pub fn new(params: Vec<TypeRef>, results: Vec<TypeRef>) -> Self {
        Self { params, results }
    }
}

/// Method of an interface or struct method set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub signature: Signature,
}

impl Method {
    pub fn new(name: impl Into<String>, params: Vec<TypeRef>, results: Vec<TypeRef>) -> Self {
        Self {
            name: name.into(),
            signature: Signature::new(params, results),
        }
    }
}

/// One node of the type graph.
///
/// Only the components meaningful for `kind` are populated: `fields` for
/// structs, `methods` for interfaces and structs, `elem` for containers and
/// maps, `key` for maps, `signature` for funcs. `methods` is always sorted by
/// name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub(super) kind: Kind,
    pub(super) name: String,
    pub(super) fields: Vec<Field>,
    pub(super) methods: Vec<Method>,
    pub(super) elem: Option<TypeRef>,
    pub(super) key: Option<TypeRef>,
    pub(super) signature: Option<Signature>,
}

impl TypeDescriptor {
    pub(super) fn new(kind: Kind, name: String) -> Self {
        Self {
            kind,
            name,
            fields: Vec::new(),
            methods: Vec::new(),
            elem: None,
            key: None,
            signature: None,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Simple (unqualified) name, empty for anonymous types.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Method set, sorted lexicographically by name.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn elem(&self) -> Option<TypeRef> {
        self.elem
    }

    pub fn key(&self) -> Option<TypeRef> {
        self.key
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }
}
