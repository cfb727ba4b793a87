//! XML type catalog parser.
//!
//! This module turns a reflection metadata dump into a [`TypeCatalog`].
//! Types may reference each other in any order: a first pass assigns an
//! identity to every `type` element, a second pass builds the definitions
//! with every reference already resolvable.

use crate::error::ParseError;
use crate::members::{Accessor, ConstructorDef, FieldDef, MethodDef, ParamDef, PropertyDef};
use crate::types::{TypeCatalog, TypeDef, TypeId, Visibility};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::path::Path;

/// Parses a type catalog from an XML string.
///
/// # Arguments
/// * `xml` - XML catalog content
///
/// # Returns
/// Parsed catalog or parse error.
///
/// # Errors
/// Returns `ParseError` if the XML is malformed, a type key is declared twice,
/// or a member references an unknown type.
pub fn parse_catalog(xml: &str) -> Result<TypeCatalog, ParseError> {
    let keys = collect_type_keys(xml)?;
    let mut key_map = HashMap::with_capacity(keys.len());
    for (idx, key) in keys.iter().enumerate() {
        if key_map.insert(key.clone(), TypeId::from_index(idx)).is_some() {
            return Err(ParseError::duplicate("type", key.clone()));
        }
    }
    let resolver = KeyResolver { keys: &key_map };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut catalog: Option<TypeCatalog> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "typeCatalog" => {
                        catalog = Some(parse_catalog_element(e)?);
                    }
                    "type" => {
                        let catalog = catalog.as_mut().ok_or_else(type_outside_catalog)?;
                        let (key, type_def) = parse_type(&mut reader, e, &resolver)?;
                        catalog.add_type(key, type_def);
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "typeCatalog" => {
                        catalog = Some(parse_catalog_element(e)?);
                    }
                    "type" => {
                        let catalog = catalog.as_mut().ok_or_else(type_outside_catalog)?;
                        let (key, type_def) = parse_type_header(e, &resolver)?;
                        catalog.add_type(key, type_def);
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    let catalog = catalog.ok_or_else(|| ParseError::InvalidStructure {
        message: "No typeCatalog element found".to_string(),
    })?;
    if catalog.len() != keys.len() {
        return Err(ParseError::InvalidStructure {
            message: format!(
                "declared {} type elements but parsed {}",
                keys.len(),
                catalog.len()
            ),
        });
    }
    Ok(catalog)
}

/// Parses a type catalog from an XML file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn parse_catalog_file(path: &Path) -> Result<TypeCatalog, ParseError> {
    let xml = std::fs::read_to_string(path)?;
    parse_catalog(&xml)
}

/// Maps catalog keys to the identities assigned by the first pass.
struct KeyResolver<'a> {
    keys: &'a HashMap<String, TypeId>,
}

impl KeyResolver<'_> {
    fn resolve(&self, key: &str, referenced_by: &str) -> Result<TypeId, ParseError> {
        self.keys
            .get(key)
            .copied()
            .ok_or_else(|| ParseError::unknown_type(key, referenced_by))
    }
}

fn type_outside_catalog() -> ParseError {
    ParseError::InvalidStructure {
        message: "type element outside of typeCatalog".to_string(),
    }
}

fn nested_type(parent: &str) -> ParseError {
    ParseError::InvalidStructure {
        message: format!("type element nested inside {parent}"),
    }
}

/// First pass: collects the key of every type element in document order.
///
/// Type elements must be direct children of `typeCatalog`.
fn collect_type_keys(xml: &str) -> Result<Vec<String>, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut keys = Vec::new();
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name().as_ref().to_vec();
                if name == b"type" {
                    check_type_parent(open.last())?;
                    keys.push(type_key(&read_attributes(e)?)?);
                }
                open.push(name);
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"type" {
                    check_type_parent(open.last())?;
                    keys.push(type_key(&read_attributes(e)?)?);
                }
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(keys)
}

fn check_type_parent(parent: Option<&Vec<u8>>) -> Result<(), ParseError> {
    match parent.map(Vec::as_slice) {
        Some(b"typeCatalog") => Ok(()),
        Some(other) => Err(nested_type(std::str::from_utf8(other)?)),
        None => Err(type_outside_catalog()),
    }
}

/// Reads and unescapes all attributes of an element.
fn read_attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, ParseError> {
    let mut attributes = Vec::new();
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        attributes.push((key.to_string(), unescape(value)?.into_owned()));
    }
    Ok(attributes)
}

/// Returns the key of a type element: its `key` attribute, or its full name.
fn type_key(attributes: &[(String, String)]) -> Result<String, ParseError> {
    let mut key = None;
    let mut name = None;
    let mut namespace = None;
    for (attr, value) in attributes {
        match attr.as_str() {
            "key" => key = Some(value.as_str()),
            "name" => name = Some(value.as_str()),
            "namespace" => namespace = Some(value.as_str()),
            _ => {}
        }
    }
    if let Some(key) = key {
        return Ok(key.to_string());
    }
    let name = name.ok_or_else(|| ParseError::missing_attr("type", "name"))?;
    Ok(match namespace {
        Some(ns) if !ns.is_empty() => format!("{}.{}", ns, name),
        _ => name.to_string(),
    })
}

fn parse_bool(element: &str, attribute: &str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ParseError::invalid_attr(element, attribute, value)),
    }
}

fn parse_visibility(element: &str, value: &str) -> Result<Visibility, ParseError> {
    Visibility::parse(value).ok_or_else(|| ParseError::invalid_attr(element, "visibility", value))
}

/// Parses the typeCatalog element attributes.
fn parse_catalog_element(e: &BytesStart<'_>) -> Result<TypeCatalog, ParseError> {
    let mut catalog = TypeCatalog::new();
    for (key, value) in read_attributes(e)? {
        if key == "rootNamespace" {
            catalog.root_namespace = Some(value);
        }
    }
    Ok(catalog)
}

/// Parses a type element's attributes (empty element form).
fn parse_type_header(
    e: &BytesStart<'_>,
    resolver: &KeyResolver<'_>,
) -> Result<(String, TypeDef), ParseError> {
    let attributes = read_attributes(e)?;
    let key = type_key(&attributes)?;

    let mut type_def = TypeDef::new(String::new());
    let mut has_name = false;

    for (attr, value) in &attributes {
        match attr.as_str() {
            "name" => {
                type_def.name = value.clone();
                has_name = true;
            }
            "namespace" => type_def.namespace = Some(value.clone()),
            "declaring" => type_def.declaring_type = Some(resolver.resolve(value, &key)?),
            "definition" => type_def.generic_definition = Some(resolver.resolve(value, &key)?),
            "arguments" => {
                type_def.generic_arguments = value
                    .split([',', ' '])
                    .filter(|s| !s.is_empty())
                    .map(|arg| resolver.resolve(arg, &key))
                    .collect::<Result<_, _>>()?;
            }
            "element" => type_def.element_type = Some(resolver.resolve(value, &key)?),
            "base" => type_def.base_type = Some(resolver.resolve(value, &key)?),
            _ => {}
        }
    }

    if !has_name {
        return Err(ParseError::missing_attr("type", "name"));
    }

    Ok((key, type_def))
}

/// Parses a type element with member children, consuming its end tag.
fn parse_type(
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
    resolver: &KeyResolver<'_>,
) -> Result<(String, TypeDef), ParseError> {
    let (key, mut type_def) = parse_type_header(e, resolver)?;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "field" => {
                        type_def.fields.push(parse_field(e, resolver, &key)?);
                        skip_to_end(reader)?;
                    }
                    "property" => {
                        let mut property = parse_property_header(e, resolver, &key)?;
                        parse_accessors(reader, &mut property)?;
                        type_def.properties.push(property);
                    }
                    "method" => {
                        let mut method = parse_method_header(e, resolver, &key)?;
                        let owner = format!("{}.{}", key, method.name);
                        method.params = parse_params(reader, resolver, &owner)?;
                        type_def.methods.push(method);
                    }
                    "constructor" => {
                        let mut constructor = parse_constructor_header(e)?;
                        let owner = format!("{}.ctor", key);
                        constructor.params = parse_params(reader, resolver, &owner)?;
                        type_def.constructors.push(constructor);
                    }
                    "type" => return Err(nested_type("type")),
                    _ => skip_to_end(reader)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                match tag_name {
                    "field" => type_def.fields.push(parse_field(e, resolver, &key)?),
                    "property" => type_def
                        .properties
                        .push(parse_property_header(e, resolver, &key)?),
                    "method" => type_def
                        .methods
                        .push(parse_method_header(e, resolver, &key)?),
                    "constructor" => type_def.constructors.push(parse_constructor_header(e)?),
                    "type" => return Err(nested_type("type")),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok((key, type_def))
}

/// Parses a field definition.
fn parse_field(
    e: &BytesStart<'_>,
    resolver: &KeyResolver<'_>,
    owner: &str,
) -> Result<FieldDef, ParseError> {
    let mut name = None;
    let mut type_key = None;
    let mut visibility = Visibility::Public;
    let mut is_static = false;

    for (attr, value) in read_attributes(e)? {
        match attr.as_str() {
            "name" => name = Some(value),
            "type" => type_key = Some(value),
            "visibility" => visibility = parse_visibility("field", &value)?,
            "static" => is_static = parse_bool("field", "static", &value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let type_key = type_key.ok_or_else(|| ParseError::missing_attr("field", "type"))?;
    let ty = resolver.resolve(&type_key, &format!("{}.{}", owner, name))?;

    let mut field = FieldDef::new(name, ty).with_visibility(visibility);
    field.is_static = is_static;
    Ok(field)
}

/// Parses a property definition's attributes.
fn parse_property_header(
    e: &BytesStart<'_>,
    resolver: &KeyResolver<'_>,
    owner: &str,
) -> Result<PropertyDef, ParseError> {
    let mut name = None;
    let mut type_key = None;

    for (attr, value) in read_attributes(e)? {
        match attr.as_str() {
            "name" => name = Some(value),
            "type" => type_key = Some(value),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("property", "name"))?;
    let type_key = type_key.ok_or_else(|| ParseError::missing_attr("property", "type"))?;
    let ty = resolver.resolve(&type_key, &format!("{}.{}", owner, name))?;

    Ok(PropertyDef::new(name, ty))
}

/// Parses getter/setter children of a property, consuming its end tag.
fn parse_accessors(
    reader: &mut Reader<&[u8]>,
    property: &mut PropertyDef,
) -> Result<(), ParseError> {
    for_each_child(reader, |tag_name, e| {
        match tag_name {
            "getter" => property.getter = Some(parse_accessor(tag_name, e)?),
            "setter" => property.setter = Some(parse_accessor(tag_name, e)?),
            _ => {}
        }
        Ok(())
    })
}

/// Parses a getter or setter element.
fn parse_accessor(element: &str, e: &BytesStart<'_>) -> Result<Accessor, ParseError> {
    let mut accessor = Accessor::default();
    for (attr, value) in read_attributes(e)? {
        match attr.as_str() {
            "visibility" => accessor.visibility = parse_visibility(element, &value)?,
            "static" => accessor.is_static = parse_bool(element, "static", &value)?,
            "abstract" => accessor.is_abstract = parse_bool(element, "abstract", &value)?,
            "virtual" => accessor.is_virtual = parse_bool(element, "virtual", &value)?,
            _ => {}
        }
    }
    Ok(accessor)
}

/// Parses a method definition's attributes.
fn parse_method_header(
    e: &BytesStart<'_>,
    resolver: &KeyResolver<'_>,
    owner: &str,
) -> Result<MethodDef, ParseError> {
    let mut method = MethodDef::new(String::new());
    let mut returns = None;

    for (attr, value) in read_attributes(e)? {
        match attr.as_str() {
            "name" => method.name = value,
            "returns" => returns = Some(value),
            "visibility" => method.visibility = parse_visibility("method", &value)?,
            "static" => method.is_static = parse_bool("method", "static", &value)?,
            "abstract" => method.is_abstract = parse_bool("method", "abstract", &value)?,
            "virtual" => method.is_virtual = parse_bool("method", "virtual", &value)?,
            "specialName" => {
                method.is_special_name = parse_bool("method", "specialName", &value)?
            }
            _ => {}
        }
    }

    if method.name.is_empty() {
        return Err(ParseError::missing_attr("method", "name"));
    }

    method.return_type = match returns.as_deref() {
        None | Some("void") => None,
        Some(key) => Some(resolver.resolve(key, &format!("{}.{}", owner, method.name))?),
    };

    Ok(method)
}

/// Parses a constructor definition's attributes.
fn parse_constructor_header(e: &BytesStart<'_>) -> Result<ConstructorDef, ParseError> {
    let mut constructor = ConstructorDef::new();
    for (attr, value) in read_attributes(e)? {
        match attr.as_str() {
            "visibility" => constructor.visibility = parse_visibility("constructor", &value)?,
            "static" => constructor.is_static = parse_bool("constructor", "static", &value)?,
            _ => {}
        }
    }
    Ok(constructor)
}

/// Parses param children, consuming the parent's end tag.
fn parse_params(
    reader: &mut Reader<&[u8]>,
    resolver: &KeyResolver<'_>,
    owner: &str,
) -> Result<Vec<ParamDef>, ParseError> {
    let mut params = Vec::new();
    for_each_child(reader, |tag_name, e| {
        if tag_name == "param" {
            params.push(parse_param(e, resolver, owner)?);
        }
        Ok(())
    })?;
    Ok(params)
}

/// Parses a parameter definition.
fn parse_param(
    e: &BytesStart<'_>,
    resolver: &KeyResolver<'_>,
    owner: &str,
) -> Result<ParamDef, ParseError> {
    let mut name = None;
    let mut type_key = None;
    let mut is_optional = false;
    let mut is_variadic = false;

    for (attr, value) in read_attributes(e)? {
        match attr.as_str() {
            "name" => name = Some(value),
            "type" => type_key = Some(value),
            "optional" => is_optional = parse_bool("param", "optional", &value)?,
            "variadic" => is_variadic = parse_bool("param", "variadic", &value)?,
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("param", "name"))?;
    let type_key = type_key.ok_or_else(|| ParseError::missing_attr("param", "type"))?;
    let ty = resolver.resolve(&type_key, &format!("{}({})", owner, name))?;

    let mut param = ParamDef::new(name, ty);
    param.is_optional = is_optional;
    param.is_variadic = is_variadic;
    Ok(param)
}

/// Visits the leaf children of the current element, consuming its end tag.
fn for_each_child<F>(reader: &mut Reader<&[u8]>, mut visit: F) -> Result<(), ParseError>
where
    F: FnMut(&str, &BytesStart<'_>) -> Result<(), ParseError>,
{
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                visit(tag_name, e)?;
                skip_to_end(reader)?;
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let tag_name = std::str::from_utf8(&name_bytes)?;
                visit(tag_name, e)?;
            }
            Ok(Event::End(_)) => break,
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}
