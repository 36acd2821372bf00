//! Procedural macro implementation for tag-assert.
//!
//! This crate provides the `#[derive(Tagged)]` implementation for the
//! `tag-assert` crate. Users should use the main `tag-assert` crate, which
//! re-exports the derive next to the `Tagged` trait.
//!
//! # Architecture Overview
//!
//! The derive works in two phases:
//!
//! 1. **Parse** (`parse.rs`): read the struct item and its `#[tag(...)]`
//!    field attributes into a small model, rejecting unsupported shapes
//!    with spanned errors.
//! 2. **Expand** (`expand.rs`): emit a `Tagged` impl whose body builds the
//!    field/tag table once, through the runtime crate's public builder API,
//!    behind a `LazyLock`.
//!
//! The generated code calls only public `tag-assert` items, so derived
//! tables and hand-written tables share one code path.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod parse;

/// Derives the `Tagged` trait, recording each field's `#[tag(...)]`
/// metadata in a static table.
///
/// Supported attribute forms on named fields:
///
/// - `#[tag(key = "value", ...)]`: attach tag pairs, order preserved.
/// - `#[tag(embed)]`: promote the fields of this field's type; the type
///   must itself implement `Tagged` and be concrete, since the table is
///   built once for all instantiations.
#[proc_macro_derive(Tagged, attributes(tag))]
pub fn derive_tagged(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match parse::tagged_struct(&input) {
        Ok(model) => expand::expand(&model).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
