//! # luameta Schema
//!
//! Runtime type model and type catalog parser.
//!
//! This crate provides:
//! - Type and member definitions for an object-oriented runtime type system
//! - The [`TypeProvider`] introspection capability set
//! - An in-memory [`TypeCatalog`] provider
//! - XML catalog parsing from reflection metadata dumps
//! - Catalog validation

pub mod error;
pub mod members;
pub mod parser;
pub mod provider;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use members::{Accessor, ConstructorDef, FieldDef, MethodDef, ParamDef, PropertyDef};
pub use parser::{parse_catalog, parse_catalog_file};
pub use provider::TypeProvider;
pub use types::{TypeCatalog, TypeDef, TypeId, Visibility};
pub use validation::validate_catalog;
