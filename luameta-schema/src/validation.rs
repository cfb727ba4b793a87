//! Catalog validation utilities.
//!
//! The generator relies on the type graph being well-formed: a type must not
//! be its own ancestor, nor reach itself through any mix of enclosing types,
//! array elements and generic arguments, otherwise name computation would
//! never bottom out.

use crate::error::SchemaError;
use crate::types::{TypeCatalog, TypeDef, TypeId};
use std::collections::HashSet;

/// Validates a catalog for correctness.
///
/// # Arguments
/// * `catalog` - The catalog to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_catalog(catalog: &TypeCatalog) -> Result<(), SchemaError> {
    let mut acyclic = HashSet::new();
    for (id, type_def) in catalog.iter() {
        check_chain(catalog, id, "base type", |def| def.base_type)?;
        check_chain(catalog, id, "declaring type", |def| def.declaring_type)?;
        check_chain(catalog, id, "element type", |def| def.element_type)?;
        check_name_structure(catalog, id, &mut Vec::new(), &mut acyclic)?;
        validate_generic_arity(catalog, type_def)?;
        validate_members(type_def)?;
    }
    Ok(())
}

/// Follows a single-successor relation from `start` and fails on a loop.
fn check_chain<F>(
    catalog: &TypeCatalog,
    start: TypeId,
    relation: &'static str,
    next: F,
) -> Result<(), SchemaError>
where
    F: Fn(&TypeDef) -> Option<TypeId>,
{
    let mut seen = HashSet::new();
    let mut path = Vec::new();
    let mut current = Some(start);

    while let Some(id) = current {
        let type_def = catalog.get_type(id).ok_or_else(|| SchemaError::TypeNotFound {
            name: id.to_string(),
        })?;
        path.push(display_name(catalog, id));
        if !seen.insert(id) {
            return Err(SchemaError::CircularReference {
                relation,
                path: path.join(" -> "),
            });
        }
        current = next(type_def);
    }

    Ok(())
}

/// Fails if `id` is reachable from itself through the edges names and
/// script names are built from: generic arguments (nullable payloads
/// included), element types and enclosing types.
///
/// `acyclic` holds types already proven free of such cycles.
fn check_name_structure(
    catalog: &TypeCatalog,
    id: TypeId,
    stack: &mut Vec<TypeId>,
    acyclic: &mut HashSet<TypeId>,
) -> Result<(), SchemaError> {
    if acyclic.contains(&id) {
        return Ok(());
    }
    if stack.contains(&id) {
        let mut path: Vec<String> = stack.iter().map(|&t| display_name(catalog, t)).collect();
        path.push(display_name(catalog, id));
        return Err(SchemaError::CircularReference {
            relation: "type structure",
            path: path.join(" -> "),
        });
    }

    let type_def = catalog.get_type(id).ok_or_else(|| SchemaError::TypeNotFound {
        name: id.to_string(),
    })?;

    stack.push(id);
    let successors = type_def
        .generic_arguments
        .iter()
        .copied()
        .chain(type_def.element_type)
        .chain(type_def.declaring_type);
    for next in successors {
        check_name_structure(catalog, next, stack, acyclic)?;
    }
    stack.pop();
    acyclic.insert(id);

    Ok(())
}

/// Checks that constructed generic types match their definition's arity.
fn validate_generic_arity(catalog: &TypeCatalog, type_def: &TypeDef) -> Result<(), SchemaError> {
    let Some(definition) = type_def.generic_definition else {
        return Ok(());
    };
    let definition = catalog
        .get_type(definition)
        .ok_or_else(|| SchemaError::TypeNotFound {
            name: definition.to_string(),
        })?;

    if let Some(arity) = definition.generic_arity() {
        if arity != type_def.generic_arguments.len() {
            return Err(SchemaError::validation(format!(
                "Generic type '{}' expects {} arguments, got {}",
                type_def.full_name(),
                arity,
                type_def.generic_arguments.len()
            )));
        }
    }

    Ok(())
}

/// Checks member name uniqueness within a type.
fn validate_members(type_def: &TypeDef) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();

    for name in type_def
        .fields
        .iter()
        .map(|f| &f.name)
        .chain(type_def.properties.iter().map(|p| &p.name))
    {
        if !seen_names.insert(name) {
            return Err(SchemaError::validation(format!(
                "Duplicate member '{}' in type '{}'",
                name,
                type_def.full_name()
            )));
        }
    }

    Ok(())
}

fn display_name(catalog: &TypeCatalog, id: TypeId) -> String {
    catalog
        .key_of(id)
        .map_or_else(|| id.to_string(), str::to_string)
}
