#![deny(missing_docs)]
//! Row-key match predicates for Arrow-described tables.
//!
//! A [`KeyPredicate`] describes which rows a multi-key lookup should return:
//! either a contiguous key range or an explicit set of keys. Predicates are
//! built from a primitive key type, a native Rust type, or a container schema
//! whose row key is declared with [`KeySchemaBuilder`]. Values are validated
//! against the key schema as they are added, and mutable key values
//! ([`Timestamp`], [`RowKey`]) are copied so callers never share state with
//! the predicate.
//!
//! ```
//! use keymatch::{KeyPredicate, KeyType, PredicateOptions};
//!
//! let mut pred = KeyPredicate::for_key_type(KeyType::Long, &PredicateOptions::default())?;
//! pred.set_start(10_i64)?;
//! pred.set_finish(20_i64)?;
//! assert!(pred.add(15_i64).is_err());
//! # Ok::<(), keymatch::PredicateError>(())
//! ```

mod logging;

pub mod key;
/// Options captured at predicate construction.
pub mod option;
pub mod predicate;
pub mod registry;
pub mod schema;

pub use crate::{
    key::{KeyComponent, KeyType, KeyValue, NativeType, RowKey, Timestamp},
    option::PredicateOptions,
    predicate::{
        BoundType, DistinctKeys, KeyCondition, KeyPredicate, KeyVariant, PredicateError,
    },
    schema::{KeyCategory, KeySchema, KeySchemaBuilder, SchemaError, KEY_METADATA},
};
