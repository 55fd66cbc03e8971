// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{Describe, Method, Signature, TypeRegistry};
use crate::kind::Kind;
use std::collections::{BTreeSet, HashMap};
use std::sync::{mpsc, Arc};

#[test]
fn base_kinds_are_shared() {
    let mut registry = TypeRegistry::new();
    let a = registry.describe::<i32>();
    let b = registry.describe::<char>();
    let c = registry.base(Kind::Int32);
    assert_eq!(a, b);
    assert_eq!(a, c);
    assert_eq!(registry.len(), 1);

    let s1 = registry.describe::<String>();
    let s2 = registry.describe::<&str>();
    assert_eq!(s1, s2);
    assert_eq!(registry.get(s1).kind(), Kind::String);
}

#[test]
fn platform_integers_map_to_int_and_uint() {
    let mut registry = TypeRegistry::new();
    let int = registry.describe::<isize>();
    let uint = registry.describe::<usize>();
    assert_eq!(registry.get(int).kind(), Kind::Int);
    assert_eq!(registry.get(uint).kind(), Kind::Uint);
}

#[test]
fn containers_record_their_element() {
    let mut registry = TypeRegistry::new();
    let vec = registry.describe::<Vec<u8>>();
    let array = registry.describe::<[u8; 4]>();
    let boxed = registry.describe::<Box<str>>();
    let shared = registry.describe::<Arc<Vec<u8>>>();
    let chan = registry.describe::<mpsc::Sender<bool>>();
    let byte = registry.describe::<u8>();

    assert_eq!(registry.get(vec).kind(), Kind::Slice);
    assert_eq!(registry.get(vec).elem(), Some(byte));
    assert_eq!(registry.get(array).kind(), Kind::Array);
    assert_eq!(registry.get(boxed).kind(), Kind::Pointer);
    assert_eq!(registry.get(shared).elem(), Some(vec));
    assert_eq!(registry.get(chan).kind(), Kind::Chan);
    assert_eq!(registry.get(vec).name(), "");
}

#[test]
fn interning_is_per_rust_type() {
    let mut registry = TypeRegistry::new();
    let first = registry.describe::<Vec<u64>>();
    let second = registry.describe::<Vec<u64>>();
    let other = registry.describe::<Vec<u32>>();
    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(registry.lookup::<Vec<u64>>(), Some(first));
    assert_eq!(registry.lookup::<Vec<i8>>(), None);
}

#[test]
fn maps_and_sets() {
    let mut registry = TypeRegistry::new();
    let map = registry.describe::<HashMap<String, Vec<i64>>>();
    let node = registry.get(map);
    assert_eq!(node.kind(), Kind::Map);
    let key = node.key().expect("map key");
    let elem = node.elem().expect("map elem");
    assert_eq!(registry.get(key).kind(), Kind::String);
    assert_eq!(registry.get(elem).kind(), Kind::Slice);

    let set = registry.describe::<BTreeSet<u16>>();
    let elem = registry.get(set).elem().expect("set elem");
    assert_eq!(registry.get(elem).kind(), Kind::Struct);
    assert!(registry.get(elem).fields().is_empty());
}

#[test]
fn fn_pointers_carry_signatures() {
    let mut registry = TypeRegistry::new();
    let func = registry.describe::<fn(i32, String) -> bool>();
    let unit = registry.describe::<fn(u8)>();
    let int32 = registry.describe::<i32>();
    let text = registry.describe::<String>();
    let flag = registry.describe::<bool>();
    let byte = registry.describe::<u8>();

    assert_eq!(registry.get(func).kind(), Kind::Func);
    assert_eq!(
        registry.get(func).signature(),
        Some(&Signature::new(vec![int32, text], vec![flag]))
    );
    assert_eq!(
        registry.get(unit).signature(),
        Some(&Signature::new(vec![byte], Vec::new()))
    );
}

#[test]
fn error_trait_object_is_the_error_interface() {
    let mut registry = TypeRegistry::new();
    let err = registry.describe::<dyn std::error::Error + Send + Sync>();
    let node = registry.get(err);
    assert_eq!(node.kind(), Kind::Interface);
    assert_eq!(node.name(), "error");
    assert_eq!(node.methods().len(), 1);
    assert_eq!(node.methods()[0].name, "Error");
}

#[test]
fn methods_are_kept_sorted() {
    let mut registry = TypeRegistry::new();
    let iface = registry.declare(Kind::Interface, "Shuffled");
    let mut names: Vec<String> = (0..32).map(|i| format!("M{i:02}")).collect();
    fastrand::shuffle(&mut names);
    for name in &names {
        registry.push_method(iface, Method::new(name.clone(), Vec::new(), Vec::new()));
    }

    let stored: Vec<&str> = registry
        .get(iface)
        .methods()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    let mut expected = stored.clone();
    expected.sort_unstable();
    assert_eq!(stored, expected);
    assert_eq!(stored.len(), 32);
}

#[test]
fn pushing_a_method_twice_replaces_it() {
    let mut registry = TypeRegistry::new();
    let int = registry.base(Kind::Int);
    let iface = registry.declare(Kind::Interface, "Foo");
    registry.push_method(iface, Method::new("Bar", Vec::new(), Vec::new()));
    registry.push_method(iface, Method::new("Bar", vec![int], Vec::new()));
    assert_eq!(registry.get(iface).methods().len(), 1);
    assert_eq!(registry.get(iface).methods()[0].signature.params, vec![int]);
}

#[test]
fn fields_keep_declaration_order() {
    let mut registry = TypeRegistry::new();
    let int = registry.base(Kind::Int);
    let node = registry.declare(Kind::Struct, "Point");
    registry.push_field(node, "y", int);
    registry.push_field(node, "x", int);
    let names: Vec<&str> = registry
        .get(node)
        .fields()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, ["y", "x"]);
}

struct Node;

impl Describe for Node {
    fn describe(registry: &mut TypeRegistry) -> super::TypeRef {
        registry.intern::<Self, _>(Kind::Struct, "Node", |registry, node| {
            let next = registry.describe::<Option<Box<Node>>>();
            registry.push_field(node, "next", next);
        })
    }
}

#[test]
fn recursive_types_resolve_to_the_node_under_construction() {
    let mut registry = TypeRegistry::new();
    let node = registry.describe::<Node>();
    let next = registry.get(node).fields()[0].ty;
    let boxed = registry.get(next).elem().expect("option elem");
    let target = registry.get(boxed).elem().expect("box elem");
    assert_eq!(target, node);
}

#[derive(crate::Describe)]
#[allow(dead_code)]
struct Telemetry {
    id: u32,
    tags: HashMap<String, String>,
}

#[test]
fn derived_struct_registers_fields_in_order() {
    let mut registry = TypeRegistry::new();
    let root = registry.describe::<Telemetry>();
    let node = registry.get(root);
    assert_eq!(node.kind(), Kind::Struct);
    assert_eq!(node.name(), "Telemetry");
    let names: Vec<&str> = node.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["id", "tags"]);
    assert_eq!(registry.lookup::<Telemetry>(), Some(root));
}
