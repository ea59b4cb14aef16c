//! ## Usage
//!
//! Splices the fields that are about to be backed by resolvers from a freshly authored GraphQL
//! schema into the schema currently deployed, so the deployed schema can be updated one resolver
//! at a time:
//!
//! ```
//! use schema_splice::MergeOptions;
//! use schema_splice::ResolverBinding;
//! use schema_splice::merge_schemas;
//!
//! let merged = merge_schemas(
//!     "type Query { version: String }",
//!     "type Query { hello: Greeting } type Greeting { text: String }",
//!     &[ResolverBinding::new("Query", "hello")],
//!     &MergeOptions::default(),
//! )
//! .unwrap();
//! assert!(merged.sdl.contains("hello: Greeting"));
//! assert!(merged.sdl.contains("type Greeting"));
//! ```
//!
//! Only the types a bound field transitively depends on are copied from the new schema:
//! its return type, its argument types, and recursively their field types, union members and
//! interface implementations. Everything else in the deployed schema is left untouched.
//!
//! The merge does not validate the resulting schema.

#![warn(
    rustdoc::broken_intra_doc_links,
    unreachable_pub,
    unreachable_patterns,
    unused,
    unused_qualifications,
    dead_code,
    while_true,
    unconditional_panic,
    clippy::all
)]

mod binding;
mod closure;
pub mod definition;
pub mod error;
pub mod merge;
pub mod splice;
pub(crate) mod utils;

pub use crate::binding::ResolverBinding;
pub use crate::error::DocumentKind;
pub use crate::error::MergeError;
pub use crate::merge::MergeHint;
pub use crate::merge::MergeOptions;
pub use crate::merge::MergeSuccess;
pub use crate::merge::merge_documents;
pub use crate::merge::merge_schemas;
pub use crate::merge::parse_document;

const _: () = {
    const fn assert_thread_safe<T: Sync + Send>() {}

    assert_thread_safe::<MergeSuccess>();
    assert_thread_safe::<MergeError>();
    assert_thread_safe::<MergeOptions>();
};
