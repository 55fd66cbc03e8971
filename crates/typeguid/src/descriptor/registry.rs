// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `TypeRegistry`: arena of descriptor nodes.
//!
//! Rust has no runtime reflection, so every type that takes part in a GUID
//! is registered here explicitly, either through the builder methods below,
//! through [`Describe`](super::Describe) impls, or by the proc macros.

use super::describe::Describe;
use super::model::{Field, Method, Signature, TypeDescriptor, TypeRef};
use crate::kind::Kind;
use std::any::TypeId;
use std::collections::HashMap;

/// Append-only arena of [`TypeDescriptor`]s.
///
/// Nodes reference each other through [`TypeRef`] handles, so cyclic and
/// mutually recursive graphs need no special representation. Once built, a
/// registry is only read, and can be shared across threads.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    nodes: Vec<TypeDescriptor>,
    interned: HashMap<TypeId, TypeRef>,
    bases: HashMap<Kind, TypeRef>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe Rust type `T` into this registry.
    pub fn describe<T: Describe + ?Sized>(&mut self) -> TypeRef {
        T::describe(self)
    }

    /// Add a blank node. Components are attached with the `set_*` and
    /// `push_*` methods.
    pub fn declare(&mut self, kind: Kind, name: impl Into<String>) -> TypeRef {
        #[allow(clippy::expect_used)] // memory runs out long before u32::MAX nodes
        let index = u32::try_from(self.nodes.len()).expect("registry node count fits within u32");
        self.nodes.push(TypeDescriptor::new(kind, name.into()));
        TypeRef(index)
    }

    /// Shared node for a base kind. Base kinds hash by kind alone, so one
    /// node per kind is enough.
    pub fn base(&mut self, kind: Kind) -> TypeRef {
        if let Some(&existing) = self.bases.get(&kind) {
            return existing;
        }
        let node = self.declare(kind, kind.as_str());
        self.bases.insert(kind, node);
        node
    }

    /// Register the node for Rust type `T` exactly once.
    ///
    /// The node is recorded before `fill` runs: a recursive `describe` of
    /// `T` from inside `fill` returns the node under construction, which is
    /// how self-referencing and mutually referencing types terminate.
    pub fn intern<T, F>(&mut self, kind: Kind, name: impl Into<String>, fill: F) -> TypeRef
    where
        T: ?Sized + 'static,
        F: FnOnce(&mut Self, TypeRef),
    {
        let id = TypeId::of::<T>();
        if let Some(&existing) = self.interned.get(&id) {
            return existing;
        }
        let node = self.declare(kind, name);
        self.interned.insert(id, node);
        fill(self, node);
        node
    }

    /// Handle already registered for `T`, if any.
    pub fn lookup<T: ?Sized + 'static>(&self) -> Option<TypeRef> {
        self.interned.get(&TypeId::of::<T>()).copied()
    }

    /// Set the element type of a container or map node.
    pub fn set_elem(&mut self, node: TypeRef, elem: TypeRef) {
        self.node_mut(node).elem = Some(elem);
    }

    /// Set the key type of a map node.
    pub fn set_key(&mut self, node: TypeRef, key: TypeRef) {
        self.node_mut(node).key = Some(key);
    }

    /// Set the signature of a func node.
    pub fn set_signature(&mut self, node: TypeRef, signature: Signature) {
        self.node_mut(node).signature = Some(signature);
    }

    /// Append a field, preserving declaration order.
    pub fn push_field(&mut self, node: TypeRef, name: impl Into<String>, ty: TypeRef) {
        self.node_mut(node).fields.push(Field::new(name, ty));
    }

    /// Insert a method, keeping the method set sorted by name. A method with
    /// the same name replaces the existing one, as a method set cannot hold
    /// two members of one name.
    pub fn push_method(&mut self, node: TypeRef, method: Method) {
        let methods = &mut self.node_mut(node).methods;
        match methods.binary_search_by(|existing| existing.name.as_str().cmp(&method.name)) {
            Ok(pos) => methods[pos] = method,
            Err(pos) => methods.insert(pos, method),
        }
    }

    /// Insert every method of `methods`.
    pub fn extend_methods(&mut self, node: TypeRef, methods: impl IntoIterator<Item = Method>) {
        for method in methods {
            self.push_method(node, method);
        }
    }

    /// Convenience: declare a container node and set its element.
    pub fn container(&mut self, kind: Kind, name: impl Into<String>, elem: TypeRef) -> TypeRef {
        let node = self.declare(kind, name);
        self.set_elem(node, elem);
        node
    }

    /// Convenience: declare a map node.
    pub fn map(&mut self, name: impl Into<String>, key: TypeRef, elem: TypeRef) -> TypeRef {
        let node = self.declare(Kind::Map, name);
        self.set_key(node, key);
        self.set_elem(node, elem);
        node
    }

    /// Get a node.
    ///
    /// # Panics
    ///
    /// Panics if `node` was produced by another registry and is out of range.
    pub fn get(&self, node: TypeRef) -> &TypeDescriptor {
        &self.nodes[node.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their handles, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeRef, &TypeDescriptor)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (TypeRef(index as u32), node))
    }

    fn node_mut(&mut self, node: TypeRef) -> &mut TypeDescriptor {
        &mut self.nodes[node.index()]
    }
}
