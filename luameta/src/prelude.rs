//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use luameta::prelude::*;
//! ```

// Type model
pub use luameta_schema::{
    Accessor, ConstructorDef, FieldDef, MethodDef, ParamDef, PropertyDef, TypeCatalog, TypeDef,
    TypeId, TypeProvider, Visibility,
};

// Catalog parsing
pub use luameta_schema::{
    ParseError, SchemaError, parse_catalog, parse_catalog_file, validate_catalog,
};

// Generation
pub use luameta_codegen::{
    CodegenError, DirectorySink, Document, DocumentSink, GeneratorConfig, MemorySink, Session,
    Shape,
};
