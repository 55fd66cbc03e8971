// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Describe` trait and its implementations for standard library types.
//!
//! # Mapping
//!
//! | Rust type                                  | Kind        |
//! |--------------------------------------------|-------------|
//! | `bool`, integers, floats, `str`, `String`  | base        |
//! | `isize` / `usize`                          | int / uint  |
//! | `char`                                     | int32       |
//! | `Vec<T>`, `VecDeque<T>`, `[T]`             | slice       |
//! | `[T; N]`                                   | array       |
//! | `Box<T>`, `Rc<T>`, `Arc<T>`, `Option<T>`   | ptr         |
//! | `&T`, `&mut T`                             | same as `T` |
//! | `HashMap<K, V>`, `BTreeMap<K, V>`          | map         |
//! | `HashSet<T>`, `BTreeSet<T>`                | map to `()` |
//! | `()`                                       | anonymous struct |
//! | `mpsc::{Sender, SyncSender, Receiver}<T>`  | chan        |
//! | `fn(A, ..) -> R`                           | func        |
//! | `dyn Error`                                | interface `error` |

use super::model::{Method, Signature, TypeRef};
use super::registry::TypeRegistry;
use crate::kind::Kind;
use std::any::TypeId;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::{mpsc, Arc};

/// Types that can register their structural descriptor.
///
/// Implemented for standard library types below, generated for structs by
/// `#[derive(Describe)]` and for interface traits (`dyn Trait`) by
/// `#[interface]`. Manual impls of named types should go through
/// [`TypeRegistry::intern`] so that recursive references terminate.
///
/// # Example
///
/// ```ignore
/// impl Describe for Celsius {
///     fn describe(registry: &mut TypeRegistry) -> TypeRef {
///         registry.intern::<Self, _>(Kind::Struct, "Celsius", |registry, node| {
///             let value = registry.describe::<f64>();
///             registry.push_field(node, "value", value);
///         })
///     }
/// }
/// ```
pub trait Describe {
    /// Register `Self` (and everything it references) and return its node.
    fn describe(registry: &mut TypeRegistry) -> TypeRef;
}

/// Method set of a type, sorted or not; the registry sorts on insertion.
///
/// Generated by `#[interface]` for `dyn Trait` and by `#[method_set]` for
/// inherent `impl` blocks.
pub trait MethodSet {
    fn method_set(registry: &mut TypeRegistry) -> Vec<Method>;
}

/// Result list of a callable returning `R`: empty for `()`.
pub fn results_of<R: Describe + ?Sized + 'static>(registry: &mut TypeRegistry) -> Vec<TypeRef> {
    if TypeId::of::<R>() == TypeId::of::<()>() {
        Vec::new()
    } else {
        vec![R::describe(registry)]
    }
}

macro_rules! describe_base {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(registry: &mut TypeRegistry) -> TypeRef {
                    registry.base(Kind::$kind)
                }
            }
        )*
    };
}

describe_base! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    usize => Uint,
    f32 => Float32,
    f64 => Float64,
    char => Int32,
    str => String,
    String => String,
}

macro_rules! describe_container {
    ($kind:ident: $($ty:ty),* $(,)?) => {
        $(
            impl<T: Describe + ?Sized + 'static> Describe for $ty {
                fn describe(registry: &mut TypeRegistry) -> TypeRef {
                    registry.intern::<Self, _>(Kind::$kind, "", |registry, node| {
                        let elem = T::describe(registry);
                        registry.set_elem(node, elem);
                    })
                }
            }
        )*
    };
}

describe_container!(Pointer: Box<T>, Rc<T>, Arc<T>);

macro_rules! describe_sized_container {
    ($kind:ident: $($ty:ty),* $(,)?) => {
        $(
            impl<T: Describe + 'static> Describe for $ty {
                fn describe(registry: &mut TypeRegistry) -> TypeRef {
                    registry.intern::<Self, _>(Kind::$kind, "", |registry, node| {
                        let elem = T::describe(registry);
                        registry.set_elem(node, elem);
                    })
                }
            }
        )*
    };
}

describe_sized_container!(Pointer: Option<T>);
describe_sized_container!(Slice: Vec<T>, VecDeque<T>, [T]);
describe_sized_container!(Chan: mpsc::Sender<T>, mpsc::SyncSender<T>, mpsc::Receiver<T>);

#[cfg(feature = "crossbeam")]
describe_sized_container!(Chan: crossbeam::channel::Sender<T>, crossbeam::channel::Receiver<T>);

impl<T: Describe + 'static, const N: usize> Describe for [T; N] {
    fn describe(registry: &mut TypeRegistry) -> TypeRef {
        registry.intern::<Self, _>(Kind::Array, "", |registry, node| {
            let elem = T::describe(registry);
            registry.set_elem(node, elem);
        })
    }
}

// References are borrows of the same value: they do not change the contract.
impl<T: Describe + ?Sized> Describe for &T {
    fn describe(registry: &mut TypeRegistry) -> TypeRef {
        T::describe(registry)
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn describe(registry: &mut TypeRegistry) -> TypeRef {
        T::describe(registry)
    }
}

impl<K, V, S> Describe for HashMap<K, V, S>
where
    K: Describe + 'static,
    V: Describe + 'static,
    S: 'static,
{
    fn describe(registry: &mut TypeRegistry) -> TypeRef {
        registry.intern::<Self, _>(Kind::Map, "", |registry, node| {
            let key = K::describe(registry);
            let elem = V::describe(registry);
            registry.set_key(node, key);
            registry.set_elem(node, elem);
        })
    }
}

impl<K: Describe + 'static, V: Describe + 'static> Describe for BTreeMap<K, V> {
    fn describe(registry: &mut TypeRegistry) -> TypeRef {
        registry.intern::<Self, _>(Kind::Map, "", |registry, node| {
            let key = K::describe(registry);
            let elem = V::describe(registry);
            registry.set_key(node, key);
            registry.set_elem(node, elem);
        })
    }
}

impl<T: Describe + 'static, S: 'static> Describe for HashSet<T, S> {
    fn describe(registry: &mut TypeRegistry) -> TypeRef {
        registry.intern::<Self, _>(Kind::Map, "", |registry, node| {
            let key = T::describe(registry);
            let elem = <()>::describe(registry);
            registry.set_key(node, key);
            registry.set_elem(node, elem);
        })
    }
}

impl<T: Describe + 'static> Describe for BTreeSet<T> {
    fn describe(registry: &mut TypeRegistry) -> TypeRef {
        registry.intern::<Self, _>(Kind::Map, "", |registry, node| {
            let key = T::describe(registry);
            let elem = <()>::describe(registry);
            registry.set_key(node, key);
            registry.set_elem(node, elem);
        })
    }
}

impl Describe for () {
    fn describe(registry: &mut TypeRegistry) -> TypeRef {
        registry.intern::<Self, _>(Kind::Struct, "", |_, _| {})
    }
}

macro_rules! describe_fn {
    ($($param:ident),*) => {
        impl<R: Describe + 'static, $($param: Describe + 'static),*> Describe for fn($($param),*) -> R {
            fn describe(registry: &mut TypeRegistry) -> TypeRef {
                registry.intern::<Self, _>(Kind::Func, "", |registry, node| {
                    let params: Vec<TypeRef> = vec![$($param::describe(registry)),*];
                    let results = results_of::<R>(registry);
                    registry.set_signature(node, Signature::new(params, results));
                })
            }
        }
    };
}

describe_fn!();
describe_fn!(A);
describe_fn!(A, B);
describe_fn!(A, B, C);
describe_fn!(A, B, C, D);

macro_rules! describe_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe(registry: &mut TypeRegistry) -> TypeRef {
                    registry.intern::<Self, _>(Kind::Interface, "error", |registry, node| {
                        let text = registry.base(Kind::String);
                        registry.push_method(node, Method::new("Error", Vec::new(), vec![text]));
                    })
                }
            }
        )*
    };
}

describe_error!(
    dyn std::error::Error,
    dyn std::error::Error + Send,
    dyn std::error::Error + Send + Sync,
);
