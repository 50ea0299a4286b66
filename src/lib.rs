//! Build GraphQL request documents from typed, schema-generated builders.
//!
//! A [`QueryBuilder`] accumulates an ordered selection set of scalar and
//! nested object fields (aliased, parameterized and conditionally included)
//! and renders it compact or indented. The generation driver in [`codegen`]
//! turns an introspection result into one typed builder per schema object.
pub mod builder;
pub mod catalog;
pub mod codegen;
pub mod config;
pub mod criterion;
pub mod directive;
pub mod encode;
pub mod error;
pub mod format;
pub mod parameter;
pub mod value;

pub use builder::{BuilderKind, FieldMetadata, ObjectBuilder, Operation, QueryBuilder};
pub use criterion::{Arguments, FieldCriterion};
pub use directive::Directives;
pub use error::{Error, Result};
pub use format::{Formatting, Layout};
pub use parameter::{Argument, DeclaredVariable, Parameter};
pub use value::{EnumValue, GraphQlEnum, InputObject, Value};

// Generated code names these through the crate so it needs no extra dependencies.
pub use chrono;
pub use serde_json;
pub use uuid;
