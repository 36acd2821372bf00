//! # tag-assert: Fluent Assertions for Struct Serialization Tags
//!
//! `tag-assert` verifies, inside unit tests, that struct fields carry the
//! serialization tags you expect (the key/value metadata consumed by
//! marshaling code) and that those tags carry the expected values. Failures
//! are reported through an injected collaborator with descriptive messages,
//! and a failed step degrades into a placeholder instead of panicking, so
//! every assertion in a chain runs and reports independently.
//!
//! # Table of Contents
//!
//! - [Quick Start](#quick-start)
//! - [Core Concepts](#core-concepts)
//!   - [The Assertion Chain](#the-assertion-chain)
//!   - [Tag Tables](#tag-tables)
//!   - [Reporters](#reporters)
//! - [Embedded Fields](#embedded-fields)
//! - [Hand-Built Tables](#hand-built-tables)
//! - [Error Messages](#error-messages)
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! tag-assert = "0.1"
//! ```
//!
//! Derive a tag table and assert on it:
//!
//! ```rust
//! use tag_assert::{expect, Tagged, TestReporter};
//!
//! #[derive(Default, Tagged)]
//! struct User {
//!     #[tag(xml = "ID", json = "id")]
//!     pub id: u64,
//!     #[tag(json = "name,omitempty")]
//!     pub name: String,
//! }
//!
//! let t = TestReporter::new();
//! expect(&t, &User::default())
//!     .expect_field("id")
//!     .assert("xml", "ID")
//!     .assert("json", "id");
//!
//! expect(&t, &User::default())
//!     .expect_field("name")
//!     .has_tag("json")
//!     .expect_tag("json")
//!     .equal("name,omitempty")
//!     .not_empty();
//! ```
//!
//! # Core Concepts
//!
//! ## The Assertion Chain
//!
//! Control flows strictly downward through three accessors:
//!
//! - [`StructAssert`]: the session, created by [`expect`]. Validates that
//!   the subject is record-shaped and memoizes field resolutions.
//! - [`Field`]: anchored to one named field, created by
//!   [`StructAssert::expect_field`]. Resolves tags.
//! - [`Tag`]: anchored to one tag key, created by [`Field::expect_tag`].
//!   Compares values.
//!
//! Failures never abort the chain. A field that does not resolve becomes a
//! placeholder whose operations keep reporting through the same reporter:
//!
//! ```rust
//! use tag_assert::{expect, RecordingReporter, Tagged};
//!
//! #[derive(Default, Tagged)]
//! struct User {
//!     pub name: String,
//! }
//!
//! let t = RecordingReporter::new();
//! let session = expect(&t, &User::default());
//! session.expect_field("email").expect_tag("json").equal("email");
//!
//! assert_eq!(
//!     t.errors(),
//!     [
//!         "User: Field <email> not found",
//!         "User.email: Tag <json> not found",
//!     ]
//! );
//! ```
//!
//! Note that the trailing `equal` reported nothing: comparisons on an
//! unresolved tag are silent no-ops, not panics.
//!
//! ## Tag Tables
//!
//! Rust has no runtime reflection, so `#[derive(Tagged)]` records each
//! field's tags in a static table at compile time. Only `pub` fields are
//! introspectable; asserting on a private field reports `is private`:
//!
//! ```rust
//! use tag_assert::{expect, RecordingReporter, Tagged};
//!
//! #[derive(Default, Tagged)]
//! struct Account {
//!     #[tag(json = "secret")]
//!     secret: String,
//! }
//!
//! let t = RecordingReporter::new();
//! expect(&t, &Account::default()).has_field("secret");
//! assert_eq!(t.errors(), ["Account: Field <secret> is private"]);
//! ```
//!
//! A subject that is not a struct at all is a fatal failure, reported
//! through the reporter's abort path:
//!
//! ```rust
//! use tag_assert::{expect, RecordingReporter};
//!
//! let t = RecordingReporter::new();
//! let session = expect(&t, &42);
//! assert!(session.failed());
//! assert_eq!(t.fatals(), ["Must be struct"]);
//! ```
//!
//! ## Reporters
//!
//! The chain never constructs its reporter; tests supply one. Use
//! [`TestReporter`] in ordinary `#[test]` functions: it collects failures
//! and panics with the full list when dropped. Implement [`Reporter`] to
//! adapt a different harness. [`RecordingReporter`] is a spy for asserting
//! on reported messages.
//!
//! # Embedded Fields
//!
//! Mark a field `#[tag(embed)]` to promote the fields of its type into the
//! enclosing namespace, the analog of anonymous embedding. Lookup prefers
//! the shallowest match and treats same-depth duplicates as not found:
//!
//! ```rust
//! use tag_assert::{expect, Tagged, TestReporter};
//!
//! #[derive(Default, Tagged)]
//! struct Timestamps {
//!     #[tag(json = "created_at")]
//!     pub created_at: String,
//! }
//!
//! #[derive(Default, Tagged)]
//! struct Post {
//!     #[tag(json = "title")]
//!     pub title: String,
//!     #[tag(embed)]
//!     pub timestamps: Timestamps,
//! }
//!
//! let t = TestReporter::new();
//! expect(&t, &Post::default())
//!     .has_field("title")
//!     .has_field("created_at");
//! ```
//!
//! Embedding requires a concrete type. The table is built once and shared
//! by every instantiation, so a field whose type mentions a generic
//! parameter cannot be promoted:
//!
//! ```compile_fail
//! use tag_assert::Tagged;
//!
//! #[derive(Tagged)]
//! struct Holder<T> {
//!     #[tag(embed)]
//!     pub inner: T,  // Error: generic parameters cannot appear in the schema table
//! }
//! ```
//!
//! # Hand-Built Tables
//!
//! Tables can be written without the derive, e.g. for anonymous shapes;
//! a nameless table renders as `<Unnamed>` in messages:
//!
//! ```rust
//! use tag_assert::{FieldSchema, RecordingReporter, StructAssert, StructSchema};
//!
//! let schema = StructSchema::anonymous()
//!     .field(FieldSchema::new("test").tag("json", ""))
//!     .build();
//!
//! let t = RecordingReporter::new();
//! let session = StructAssert::with_schema(&t, &schema);
//! session.expect_field("test").expect_tag("json").not_empty();
//! assert_eq!(t.errors(), ["<Unnamed>.test: Tag <json> is empty"]);
//! ```
//!
//! # Error Messages
//!
//! Formats are stable and identify the field as `<TypeName>.<FieldName>`:
//!
//! ```text
//! User: Field <email> not found
//! Account: Field <secret> is private
//! User.id: Tag <bson> not found
//! User.id: Tag <json> does not have a value of <identifier>,but actual <id>
//! User.name: Tag <json> is empty
//! User.plain: Not empty
//! ```

mod error;
mod field;
mod reporter;
mod schema;
mod session;
mod tag;

pub use error::Failure;
pub use field::Field;
pub use reporter::{RecordingReporter, Reporter, TestReporter};
pub use schema::{FieldSchema, Schema, StructSchema, StructSchemaBuilder, Tagged};
pub use session::{StructAssert, expect};
pub use tag::Tag;

// The derive lives in its own proc-macro crate; re-export it next to the
// trait it implements.
pub use tag_assert_macros::Tagged;
