// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Canonicalizer: reduces a type graph to an ordered token stream.
//!
//! # Token rules
//!
//! Every node first emits its kind token, then:
//!
//! - **interface**: its simple name, then each method (sorted by name),
//!   unless the name was already visited during this call
//! - **struct**: as interface, with each field (declaration order) emitted as
//!   its name followed by its type, before the methods
//! - **array / chan / ptr / slice**: the element type, or the marker `*` and
//!   the node's name when the element is the node itself
//! - **map**: key type, then element type
//! - **func**: nothing, or with [`FuncSignatures::Expand`] the parameter
//!   count, the result count, then the parameter and result types
//! - **base kinds**: nothing
//! - anything else fails with [`GuidError::UnsupportedKind`]
//!
//! A method emits its name, then its parameter types, then its result types.

use crate::config::{FuncSignatures, GuidConfig, RootName, SELF_REFERENCE_MARKER, TOKEN_DELIMITER};
use crate::descriptor::{Method, Signature, TypeDescriptor, TypeRef, TypeRegistry};
use crate::error::{GuidError, Result};
use crate::kind::Kind;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Destination of canonical tokens.
pub(crate) trait TokenSink {
    fn write_token(&mut self, token: &str);
}

impl TokenSink for Sha256 {
    fn write_token(&mut self, token: &str) {
        self.update(token.as_bytes());
        self.update([TOKEN_DELIMITER]);
    }
}

impl TokenSink for Vec<String> {
    fn write_token(&mut self, token: &str) {
        self.push(token.to_owned());
    }
}

/// One walk over one type graph. Created per calculation and dropped with
/// it: the visited set never outlives a call.
pub(crate) struct Canonicalizer<'r, S> {
    registry: &'r TypeRegistry,
    config: GuidConfig,
    sink: S,
    /// Interface/struct names whose expansion has begun.
    visited: HashSet<&'r str>,
    depth: usize,
    tokens: usize,
}

impl<'r, S: TokenSink> Canonicalizer<'r, S> {
    pub(crate) fn new(registry: &'r TypeRegistry, config: GuidConfig, sink: S) -> Self {
        Self {
            registry,
            config,
            sink,
            visited: HashSet::new(),
            depth: 0,
            tokens: 0,
        }
    }

    /// Number of tokens emitted so far.
    pub(crate) fn token_count(&self) -> usize {
        self.tokens
    }

    pub(crate) fn into_sink(self) -> S {
        self.sink
    }

    fn write(&mut self, token: &str) {
        log::trace!("[canon] {:indent$}{:?}", "", token, indent = self.depth * 2);
        self.sink.write_token(token);
        self.tokens += 1;
    }

    pub(crate) fn recurse_type(&mut self, ty: TypeRef) -> Result<()> {
        let registry = self.registry;
        let node = registry.get(ty);
        let kind = node.kind();
        self.write(kind.as_str());
        if !kind.is_supported() {
            return Err(GuidError::UnsupportedKind {
                kind,
                name: node.name().to_owned(),
            });
        }

        match kind {
            kind if kind.is_named() => self.recurse_named(node),
            kind if kind.is_container() => {
                let elem = require(node, node.elem(), "element")?;
                if elem == ty {
                    // type T *T: the element never reaches a named cycle guard
                    log::debug!("[canon] self-referential {} {:?}", kind, node.name());
                    self.write(SELF_REFERENCE_MARKER);
                    self.write(node.name());
                    return Ok(());
                }
                self.descend(elem)
            }
            Kind::Map => {
                let key = require(node, node.key(), "key")?;
                let elem = require(node, node.elem(), "element")?;
                self.descend(key)?;
                self.descend(elem)
            }
            Kind::Func => match self.config.func_signatures {
                FuncSignatures::Opaque => Ok(()),
                FuncSignatures::Expand => {
                    let signature = require(node, node.signature(), "signature")?;
                    // arity first, or a type could move between params and results unnoticed
                    self.write(&signature.params.len().to_string());
                    self.write(&signature.results.len().to_string());
                    self.recurse_signature(signature)
                }
            },
            // base kinds
            _ => Ok(()),
        }
    }

    fn recurse_named(&mut self, node: &'r TypeDescriptor) -> Result<()> {
        let name = node.name();
        let omit_root = self.depth == 0 && self.config.root_name == RootName::Omit;
        self.write(if omit_root { "" } else { name });

        if !self.visited.insert(name) {
            log::debug!("[canon] cycle guard hit for {} {:?}", node.kind(), name);
            return Ok(());
        }

        for field in node.fields() {
            self.write(&field.name);
            self.descend(field.ty)?;
        }
        for method in node.methods() {
            self.recurse_method(method)?;
        }
        Ok(())
    }

    pub(crate) fn recurse_method(&mut self, method: &'r Method) -> Result<()> {
        self.write(&method.name);
        self.recurse_signature(&method.signature)
    }

    fn recurse_signature(&mut self, signature: &'r Signature) -> Result<()> {
        for &param in &signature.params {
            self.descend(param)?;
        }
        for &result in &signature.results {
            self.descend(result)?;
        }
        Ok(())
    }

    fn descend(&mut self, ty: TypeRef) -> Result<()> {
        self.depth += 1;
        let outcome = self.recurse_type(ty);
        self.depth -= 1;
        outcome
    }
}

fn require<T>(node: &TypeDescriptor, part: Option<T>, missing: &'static str) -> Result<T> {
    part.ok_or_else(|| GuidError::IncompleteDescriptor {
        kind: node.kind(),
        name: node.name().to_owned(),
        missing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(registry: &TypeRegistry, root: TypeRef, config: GuidConfig) -> Result<Vec<String>> {
        let mut canon = Canonicalizer::new(registry, config, Vec::new());
        canon.recurse_type(root)?;
        Ok(canon.into_sink())
    }

    #[test]
    fn test_base_kind_is_single_token() {
        let mut registry = TypeRegistry::new();
        let int = registry.base(Kind::Int);
        let out = tokens(&registry, int, GuidConfig::default()).expect("tokens");
        assert_eq!(out, ["int"]);
    }

    #[test]
    fn test_struct_fields_then_methods() {
        let mut registry = TypeRegistry::new();
        let int = registry.base(Kind::Int);
        let text = registry.base(Kind::String);
        let node = registry.declare(Kind::Struct, "Point");
        registry.push_field(node, "y", int);
        registry.push_field(node, "x", text);
        registry.push_method(node, Method::new("Norm", Vec::new(), vec![int]));

        let out = tokens(&registry, node, GuidConfig::default()).expect("tokens");
        assert_eq!(
            out,
            ["struct", "Point", "y", "int", "x", "string", "Norm", "int"]
        );
    }

    #[test]
    fn test_map_key_before_elem() {
        let mut registry = TypeRegistry::new();
        let text = registry.base(Kind::String);
        let flag = registry.base(Kind::Bool);
        let map = registry.map("", text, flag);
        let out = tokens(&registry, map, GuidConfig::default()).expect("tokens");
        assert_eq!(out, ["map", "string", "bool"]);
    }

    #[test]
    fn test_self_referential_pointer_uses_marker() {
        let mut registry = TypeRegistry::new();
        let ptr = registry.declare(Kind::Pointer, "Foo");
        registry.set_elem(ptr, ptr);
        let out = tokens(&registry, ptr, GuidConfig::default()).expect("tokens");
        assert_eq!(out, ["ptr", "*", "Foo"]);
    }

    #[test]
    fn test_revisited_name_is_cut() {
        let mut registry = TypeRegistry::new();
        let iface = registry.declare(Kind::Interface, "Foo");
        registry.push_method(iface, Method::new("Bar", Vec::new(), vec![iface]));
        let out = tokens(&registry, iface, GuidConfig::default()).expect("tokens");
        assert_eq!(out, ["interface", "Foo", "Bar", "interface", "Foo"]);
    }

    #[test]
    fn test_visited_set_is_keyed_by_name_only() {
        // Two distinct nodes sharing a simple name: the second is cut.
        let mut registry = TypeRegistry::new();
        let int = registry.base(Kind::Int);
        let inner = registry.declare(Kind::Struct, "Dup");
        registry.push_field(inner, "a", int);
        let outer = registry.declare(Kind::Struct, "Dup");
        registry.push_field(outer, "inner", inner);

        let out = tokens(&registry, outer, GuidConfig::default()).expect("tokens");
        assert_eq!(out, ["struct", "Dup", "inner", "struct", "Dup"]);
    }

    #[test]
    fn test_func_opaque_and_expanded() {
        let mut registry = TypeRegistry::new();
        let int = registry.base(Kind::Int);
        let flag = registry.base(Kind::Bool);
        let func = registry.declare(Kind::Func, "");
        registry.set_signature(func, Signature::new(vec![int], vec![flag]));

        let opaque = tokens(&registry, func, GuidConfig::default()).expect("tokens");
        assert_eq!(opaque, ["func"]);
        let expanded = tokens(&registry, func, GuidConfig::strict()).expect("tokens");
        assert_eq!(expanded, ["func", "1", "1", "int", "bool"]);
    }

    #[test]
    fn test_expanded_func_separates_params_from_results() {
        let mut registry = TypeRegistry::new();
        let int = registry.base(Kind::Int);
        let takes = registry.declare(Kind::Func, "");
        registry.set_signature(takes, Signature::new(vec![int], Vec::new()));
        let gives = registry.declare(Kind::Func, "");
        registry.set_signature(gives, Signature::new(Vec::new(), vec![int]));

        let strict = GuidConfig::strict();
        let takes = tokens(&registry, takes, strict).expect("tokens");
        let gives = tokens(&registry, gives, strict).expect("tokens");
        assert_eq!(takes, ["func", "1", "0", "int"]);
        assert_eq!(gives, ["func", "0", "1", "int"]);
    }

    #[test]
    fn test_expand_leaves_method_signatures_alone() {
        let mut registry = TypeRegistry::new();
        let int = registry.base(Kind::Int);
        let iface = registry.declare(Kind::Interface, "Foo");
        registry.push_method(iface, Method::new("Bar", vec![int], Vec::new()));

        let out = tokens(&registry, iface, GuidConfig::strict()).expect("tokens");
        assert_eq!(out, ["interface", "Foo", "Bar", "int"]);
    }

    #[test]
    fn test_root_name_omitted_only_at_root() {
        let mut registry = TypeRegistry::new();
        let iface = registry.declare(Kind::Interface, "Foo");
        registry.push_method(iface, Method::new("Bar", Vec::new(), vec![iface]));
        let config = GuidConfig::default().root_name(RootName::Omit);
        let out = tokens(&registry, iface, config).expect("tokens");
        assert_eq!(out, ["interface", "", "Bar", "interface", "Foo"]);
    }

    #[test]
    fn test_unsupported_kind_aborts() {
        let mut registry = TypeRegistry::new();
        let raw = registry.declare(Kind::UnsafePointer, "Handle");
        let holder = registry.declare(Kind::Struct, "Holder");
        registry.push_field(holder, "raw", raw);

        let err = tokens(&registry, holder, GuidConfig::default()).unwrap_err();
        assert_eq!(
            err,
            GuidError::UnsupportedKind {
                kind: Kind::UnsafePointer,
                name: "Handle".to_string(),
            }
        );
    }

    #[test]
    fn test_incomplete_container() {
        let mut registry = TypeRegistry::new();
        let slice = registry.declare(Kind::Slice, "");
        let err = tokens(&registry, slice, GuidConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GuidError::IncompleteDescriptor {
                kind: Kind::Slice,
                missing: "element",
                ..
            }
        ));
    }

    #[test]
    fn test_sha_sink_appends_delimiter() {
        let mut hasher = Sha256::new();
        hasher.write_token("ab");
        hasher.write_token("c");
        let split = hasher.finalize();

        let mut hasher = Sha256::new();
        hasher.write_token("a");
        hasher.write_token("bc");
        assert_ne!(split, hasher.finalize());
    }
}
