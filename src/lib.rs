//! This is a library for validating records (structs or key/value
//! maps) against declarative per-field metadata, followed by an
//! optional custom validator supplied by the record's type.
//!
//! Typically to use this library, you would either implement
//! [Describe](Describe) for your record type and call
//! [validate()](validate()), or build a
//! [RecordValidator](RecordValidator) around a
//! [MetadataProvider](MetadataProvider) and hand it any
//! [Record](Record).
//!
//! A validation call:
//!
//! 1. reads the record's [RecordMetadata](RecordMetadata), failing
//!    with `"fail reading meta data. <reason>"` if that is not
//!    possible;
//! 2. checks each [FieldDescriptor](FieldDescriptor) in declaration
//!    order, reporting every failing field as
//!    `"<field>: <message>"` joined by `" | "`;
//! 3. only if every field passed, runs the custom validator named in
//!    the metadata, reporting a failure as
//!    `"custom validator error. <message>"`.
//!
//! ## Example
//! ```
//! use record_validation::{FieldDescriptor, FixedMetadata, RecordMetadata, RecordValidator};
//! use std::collections::HashMap;
//!
//! let validator = RecordValidator::new(FixedMetadata(
//!     RecordMetadata::new().field(FieldDescriptor::new("title").required(true)),
//! ));
//!
//! let mut form: HashMap<String, String> = HashMap::new();
//! form.insert("title".into(), String::new());
//!
//! assert_eq!(
//!     "title: could not be nil or empty",
//!     validator.validate(&form).unwrap_err().to_string()
//! );
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod concat_results;
mod config;
mod custom;
mod error;
mod field;
mod metadata;
mod record;
mod skipped_fields;
mod validatable;
mod validation;
mod validator;
mod validator_fn;

pub use concat_results::concat_results;
pub use config::*;
pub use custom::*;
pub use error::*;
pub use field::*;
pub use metadata::*;
pub use record::*;
pub use validatable::*;
pub use validation::*;
pub use validator::*;
pub use validator_fn::*;
