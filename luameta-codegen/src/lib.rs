//! # luameta Codegen
//!
//! Lua annotation generation from runtime type metadata.
//!
//! This crate provides:
//! - Type descriptors with shape classification and cached names
//! - A descriptor registry tracking inheritance edges
//! - Field, property, method and constructor annotation generators
//! - A generation session producing one `---@meta` document per type
//! - Document sinks for memory and directory output

pub mod config;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod lua;
pub mod modifiers;
pub mod names;
pub mod registry;
pub mod session;

pub use config::GeneratorConfig;
pub use descriptor::{Shape, Signature, TypeDescriptor};
pub use document::{DirectorySink, Document, DocumentSink, MemorySink};
pub use error::CodegenError;
pub use modifiers::Modifiers;
pub use registry::{BaseLink, DescriptorId, Registry};
pub use session::Session;

use luameta_schema::TypeCatalog;

/// Generates annotation documents from an XML type catalog.
///
/// # Arguments
/// * `xml` - Catalog XML content
/// * `roots` - Keys of the types to document
///
/// # Returns
/// One document per root, in the order given; repeated roots are skipped.
///
/// # Errors
/// Returns `CodegenError` if parsing or validation fails, or a root key is unknown.
pub fn generate_from_xml(xml: &str, roots: &[&str]) -> Result<Vec<Document>, CodegenError> {
    let catalog = luameta_schema::parse_catalog(xml)?;
    luameta_schema::validate_catalog(&catalog)?;
    generate_from_catalog(&catalog, roots)
}

/// Generates annotation documents from an XML type catalog file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation or root lookup fails.
pub fn generate_from_file(
    path: &std::path::Path,
    roots: &[&str],
) -> Result<Vec<Document>, CodegenError> {
    let xml = std::fs::read_to_string(path)?;
    generate_from_xml(&xml, roots)
}

/// Generates annotation documents from an already parsed catalog.
///
/// The catalog's root namespace, when present, overrides the default one.
///
/// # Errors
/// Returns `CodegenError::UnknownType` if a root key is not in the catalog.
pub fn generate_from_catalog(
    catalog: &TypeCatalog,
    roots: &[&str],
) -> Result<Vec<Document>, CodegenError> {
    let mut session = Session::with_config(catalog, GeneratorConfig::for_catalog(catalog));
    for &root in roots {
        let ty = catalog
            .type_by_key(root)
            .ok_or_else(|| CodegenError::unknown_type(root))?;
        session.generate(ty);
    }
    Ok(session.into_documents())
}
