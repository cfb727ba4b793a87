//! # luameta
//!
//! Lua language-server annotation generator for runtime type metadata.
//!
//! luameta walks an object-oriented type graph (classes, fields, properties,
//! methods, constructors, generics, nullables, arrays, dictionaries,
//! delegates) and emits one `---@meta` document per type, ready to be
//! consumed by a Lua language server.
//!
//! ## Features
//!
//! - **Provider-agnostic** - any introspection source implementing [`TypeProvider`]
//! - **XML catalogs** - bundled [`TypeCatalog`] parsed from a metadata dump
//! - **Container aware** - arrays, lists and dictionaries render as `T[]` and `table<K, V>`
//! - **Overload sets** - methods and constructors grouped by name and modifiers
//!
//! ## Quick Start
//!
//! ```ignore
//! use luameta::prelude::*;
//!
//! let catalog = parse_catalog(&std::fs::read_to_string("types.xml")?)?;
//! let mut session = Session::new(&catalog);
//! let item = catalog.type_by_key("Item").ok_or("Item is not declared")?;
//! session.generate_reachable(&[item]);
//! session.write_to(&mut DirectorySink::new("lua")?)?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type model, provider trait, XML catalog parsing and validation
//! - [`codegen`] - Descriptors, names, member generators and sessions

pub mod prelude;

/// Type model, provider trait and catalog parsing.
pub mod schema {
    pub use luameta_schema::*;
}

/// Annotation generation.
pub mod codegen {
    pub use luameta_codegen::*;
}

// Re-export commonly used items at the crate root
pub use luameta_codegen::{
    CodegenError, DirectorySink, Document, DocumentSink, GeneratorConfig, MemorySink, Session,
    generate_from_file, generate_from_xml,
};
pub use luameta_schema::{TypeCatalog, TypeDef, TypeId, TypeProvider};
