// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Registration macros for `typeguid`.
//!
//! Rust has no runtime reflection: these macros emit, per type, the
//! descriptor a reflective runtime would report (kind, simple name, fields in
//! declaration order, methods with their parameter and result types).

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::visit_mut::{self, VisitMut};
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, FnArg, GenericArgument, GenericParam,
    Generics, ImplItem, ItemImpl, ItemTrait, LitStr, Path, PathArguments, ReturnType, Signature,
    TraitItem, Type,
};

/// `#[derive(Describe)]` macro: generates `typeguid::Describe` for a struct
///
/// Supports:
/// - Named, tuple (fields `0`, `1`, ...) and unit structs
/// - Generic structs (type parameters get a `Describe + 'static` bound)
///
/// Attributes:
/// - `#[guid(name = "Other")]` on the struct: simple name to hash
/// - `#[guid(methods)]` on the struct: attach the `MethodSet` generated by
///   `#[method_set]` on the struct's inherent impl
/// - `#[guid(rename = "other")]` on a field: field name to hash
/// - `#[guid(skip)]` on a field: leave it out of the contract
///
/// Example:
/// ```ignore
/// use typeguid::Describe;
///
/// #[derive(Describe)]
/// struct Reading {
///     channel: u8,
///     samples: Vec<f64>,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(guid))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_derive(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `#[interface]` attribute: makes `dyn Trait` describable as an interface
///
/// The trait is emitted unchanged, followed by `MethodSet` and `Describe`
/// impls for `dyn Trait`. The trait must be object safe.
///
/// - Receivers are not part of the signature
/// - No return type or `()` means no results; a tuple return type yields one
///   result per element; `Result<T, E>` yields the results of `T` then `E`
/// - Methods without a receiver are ignored
///
/// Options:
/// - `#[interface(name = "Other")]`: simple name to hash
/// - `#[interface(extends(Base, ...))]`: flatten the method sets of other
///   `#[interface]` traits into this one
///
/// Example:
/// ```ignore
/// #[typeguid::interface]
/// trait Store {
///     fn get(&self, key: &str) -> Option<Vec<u8>>;
///     fn put(&mut self, key: &str, value: Vec<u8>);
/// }
///
/// let guid = typeguid::calculate::<dyn Store>()?;
/// ```
#[proc_macro_attribute]
pub fn interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut options = InterfaceOptions::default();
    let parser = syn::meta::parser(|meta| options.parse(meta));
    parse_macro_input!(attr with parser);
    let item = parse_macro_input!(item as ItemTrait);
    expand_interface(options, item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `#[method_set]` attribute: generates `typeguid::MethodSet` for the self
/// type of an inherent `impl` block
///
/// Every method taking a receiver becomes a member of the set; associated
/// functions are ignored. Pair with `#[guid(methods)]` on the struct.
#[proc_macro_attribute]
pub fn method_set(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = proc_macro2::TokenStream::from(attr);
        return syn::Error::new_spanned(attr, "#[method_set] takes no arguments")
            .into_compile_error()
            .into();
    }
    let item = parse_macro_input!(item as ItemImpl);
    expand_method_set(item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_derive(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;
    let mut type_name = ident.to_string();
    let mut with_methods = false;

    for attr in input.attrs.iter().filter(|a| a.path().is_ident("guid")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                type_name = meta.value()?.parse::<LitStr>()?.value();
                Ok(())
            } else if meta.path.is_ident("methods") {
                with_methods = true;
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"` or `methods`"))
            }
        })?;
    }

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "Describe cannot be derived for enums: implement it by hand",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "Describe cannot be derived for unions",
            ))
        }
    };

    let mut pushes = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        // Tuple fields are named by position, as `self.0` spells them
        let mut field_name = field
            .ident
            .as_ref()
            .map_or_else(|| index.to_string(), ToString::to_string);
        let mut skip = false;
        for attr in field.attrs.iter().filter(|a| a.path().is_ident("guid")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    field_name = meta.value()?.parse::<LitStr>()?.value();
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"...\"` or `skip`"))
                }
            })?;
        }
        if skip {
            continue;
        }
        let ty = describe_type(&field.ty);
        pushes.push(quote! {
            let ty = #ty;
            registry.push_field(node, #field_name, ty);
        });
    }

    let methods = if with_methods {
        quote! {
            let methods = <Self as ::typeguid::MethodSet>::method_set(registry);
            registry.extend_methods(node, methods);
        }
    } else {
        quote! {}
    };

    let generics = describable_generics(&input.generics);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::typeguid::Describe for #ident #ty_generics #where_clause {
            #[allow(unused_variables)] // field-less structs never touch the node
            fn describe(registry: &mut ::typeguid::TypeRegistry) -> ::typeguid::TypeRef {
                registry.intern::<Self, _>(::typeguid::Kind::Struct, #type_name, |registry, node| {
                    #(#pushes)*
                    #methods
                })
            }
        }
    })
}

#[derive(Default)]
struct InterfaceOptions {
    name: Option<String>,
    extends: Vec<Path>,
}

impl InterfaceOptions {
    fn parse(&mut self, meta: syn::meta::ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse::<LitStr>()?.value());
            Ok(())
        } else if meta.path.is_ident("extends") {
            meta.parse_nested_meta(|base| {
                self.extends.push(base.path);
                Ok(())
            })
        } else {
            Err(meta.error("expected `name = \"...\"` or `extends(...)`"))
        }
    }
}

fn expand_interface(
    options: InterfaceOptions,
    item: ItemTrait,
) -> syn::Result<proc_macro2::TokenStream> {
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "#[interface] traits cannot be generic",
        ));
    }
    let ident = &item.ident;
    let type_name = options.name.unwrap_or_else(|| ident.to_string());

    let mut methods = Vec::new();
    for entry in &item.items {
        if let TraitItem::Fn(func) = entry {
            if func.sig.receiver().is_some() {
                methods.push(method_expr(&func.sig)?);
            }
        }
    }
    let extends = options.extends.iter().map(|base| {
        quote! {
            let methods = <dyn #base as ::typeguid::MethodSet>::method_set(registry);
            registry.extend_methods(node, methods);
        }
    });

    Ok(quote! {
        #item

        impl ::typeguid::MethodSet for dyn #ident {
            #[allow(unused_variables)] // empty method sets never touch the registry
            fn method_set(registry: &mut ::typeguid::TypeRegistry) -> ::std::vec::Vec<::typeguid::Method> {
                ::std::vec![#(#methods),*]
            }
        }

        impl ::typeguid::Describe for dyn #ident {
            fn describe(registry: &mut ::typeguid::TypeRegistry) -> ::typeguid::TypeRef {
                registry.intern::<Self, _>(::typeguid::Kind::Interface, #type_name, |registry, node| {
                    let methods = <Self as ::typeguid::MethodSet>::method_set(registry);
                    registry.extend_methods(node, methods);
                    #(#extends)*
                })
            }
        }
    })
}

fn expand_method_set(item: ItemImpl) -> syn::Result<proc_macro2::TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[method_set] applies to inherent impl blocks only",
        ));
    }

    let mut methods = Vec::new();
    for entry in &item.items {
        if let ImplItem::Fn(func) = entry {
            if func.sig.receiver().is_some() {
                methods.push(method_expr(&func.sig)?);
            }
        }
    }

    let self_ty = &item.self_ty;
    let generics = describable_generics(&item.generics);
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics ::typeguid::MethodSet for #self_ty #where_clause {
            #[allow(unused_variables)] // empty method sets never touch the registry
            fn method_set(registry: &mut ::typeguid::TypeRegistry) -> ::std::vec::Vec<::typeguid::Method> {
                ::std::vec![#(#methods),*]
            }
        }
    })
}

/// Interning keys on `TypeId`: every lifetime must outlive `'static` and
/// every type parameter must itself be describable.
fn describable_generics(generics: &Generics) -> Generics {
    let mut generics = generics.clone();
    for param in &mut generics.params {
        match param {
            GenericParam::Type(ty) => {
                ty.bounds.push(parse_quote!(::typeguid::Describe));
                ty.bounds.push(parse_quote!('static));
            }
            GenericParam::Lifetime(lt) => lt.bounds.push(parse_quote!('static)),
            GenericParam::Const(_) => {}
        }
    }
    generics
}

/// Build the `Method::new(..)` expression for one signature, receiver
/// excluded.
fn method_expr(sig: &Signature) -> syn::Result<proc_macro2::TokenStream> {
    if let Some(param) = sig.generics.type_params().next() {
        return Err(syn::Error::new_spanned(
            param,
            "generic methods have no single signature to describe",
        ));
    }

    let name = sig.ident.to_string();
    let mut params = Vec::new();
    for input in &sig.inputs {
        if let FnArg::Typed(arg) = input {
            if let Type::ImplTrait(_) = &*arg.ty {
                return Err(syn::Error::new_spanned(
                    &arg.ty,
                    "`impl Trait` parameters have no single type to describe",
                ));
            }
            params.push(describe_type(&arg.ty));
        }
    }

    let results = match &sig.output {
        ReturnType::Default => Vec::new(),
        ReturnType::Type(_, ty) => result_exprs(ty),
    };

    Ok(quote! {
        ::typeguid::Method::new(#name, ::std::vec![#(#params),*], ::std::vec![#(#results),*])
    })
}

/// One describe expression per result of a callable returning `ty`.
///
/// `()` yields nothing, a tuple one result per element, and `Result<T, E>`
/// the results of `T` followed by `E`, like a Go `(T, error)` pair.
fn result_exprs(ty: &Type) -> Vec<proc_macro2::TokenStream> {
    if let Type::Tuple(tuple) = ty {
        return tuple.elems.iter().map(describe_type).collect();
    }
    if let Some((ok, err)) = result_arguments(ty) {
        let mut exprs = result_exprs(ok);
        exprs.push(describe_type(err));
        return exprs;
    }
    vec![describe_type(ty)]
}

/// `T` and `E` of a type spelled `Result<T, E>` (any path ending in it).
fn result_arguments(ty: &Type) -> Option<(&Type, &Type)> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    let mut types = args.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });
    match (types.next(), types.next(), types.next()) {
        (Some(ok), Some(err), None) => Some((ok, err)),
        _ => None,
    }
}

/// `registry.describe::<T>()` with every lifetime of `T` set to `'static`.
fn describe_type(ty: &Type) -> proc_macro2::TokenStream {
    let ty = static_type(ty);
    quote! { registry.describe::<#ty>() }
}

fn static_type(ty: &Type) -> Type {
    let mut ty = ty.clone();
    StaticLifetimes.visit_type_mut(&mut ty);
    ty
}

/// Rewrites every lifetime, named or elided, to `'static`: descriptors are
/// interned by `TypeId`, which only exists for `'static` types.
struct StaticLifetimes;

impl VisitMut for StaticLifetimes {
    fn visit_lifetime_mut(&mut self, lifetime: &mut syn::Lifetime) {
        *lifetime = syn::Lifetime::new("'static", lifetime.span());
    }

    fn visit_type_reference_mut(&mut self, reference: &mut syn::TypeReference) {
        if reference.lifetime.is_none() {
            reference.lifetime = Some(syn::Lifetime::new(
                "'static",
                proc_macro2::Span::call_site(),
            ));
        }
        visit_mut::visit_type_reference_mut(self, reference);
    }
}
