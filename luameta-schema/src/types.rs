//! Catalog type definitions.
//!
//! This module contains the data structures representing runtime types:
//! identities, visibility, type definitions and the [`TypeCatalog`] arena
//! that owns them.

use crate::members::{ConstructorDef, FieldDef, MethodDef, PropertyDef};
use std::collections::HashMap;
use std::fmt;

/// Identity of a runtime type inside a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Creates a type identity from an arena index.
    ///
    /// # Panics
    /// Panics if `index` does not fit in 32 bits.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("type index overflows u32"))
    }

    /// Returns the arena index of this identity.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    /// Accessible everywhere.
    #[default]
    Public,
    /// Accessible only within the declaring type.
    Private,
    /// Protected: accessible within the type family.
    Family,
    /// Internal: accessible within the assembly.
    Assembly,
    /// Protected internal.
    FamilyOrAssembly,
    /// Private protected.
    FamilyAndAssembly,
}

impl Visibility {
    /// Parses visibility from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "family" | "protected" => Some(Self::Family),
            "assembly" | "internal" => Some(Self::Assembly),
            "familyorassembly" | "protected internal" => Some(Self::FamilyOrAssembly),
            "familyandassembly" | "private protected" => Some(Self::FamilyAndAssembly),
            _ => None,
        }
    }

    /// Returns true for public members.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }

    /// Returns true for private members.
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }

    /// Returns true for protected (family-only) members.
    #[must_use]
    pub const fn is_family(self) -> bool {
        matches!(self, Self::Family)
    }
}

/// Runtime type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// Simple name, possibly with a generic arity suffix (``List`1``) or
    /// decoration (`Int32[]`, `Int32&`).
    pub name: String,
    /// Namespace, if any.
    pub namespace: Option<String>,
    /// Enclosing type for nested types.
    pub declaring_type: Option<TypeId>,
    /// Generic type definition for constructed generic types.
    pub generic_definition: Option<TypeId>,
    /// Generic type arguments for constructed generic types.
    pub generic_arguments: Vec<TypeId>,
    /// Element type for array types.
    pub element_type: Option<TypeId>,
    /// Base type.
    pub base_type: Option<TypeId>,
    /// Declared fields.
    pub fields: Vec<FieldDef>,
    /// Declared properties.
    pub properties: Vec<PropertyDef>,
    /// Declared methods.
    pub methods: Vec<MethodDef>,
    /// Declared constructors.
    pub constructors: Vec<ConstructorDef>,
}

impl TypeDef {
    /// Creates a new type definition without namespace or members.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            declaring_type: None,
            generic_definition: None,
            generic_arguments: Vec::new(),
            element_type: None,
            base_type: None,
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Sets the namespace.
    #[must_use]
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the enclosing type.
    #[must_use]
    pub fn nested_in(mut self, declaring_type: TypeId) -> Self {
        self.declaring_type = Some(declaring_type);
        self
    }

    /// Makes this a constructed generic type.
    #[must_use]
    pub fn generic(mut self, definition: TypeId, arguments: Vec<TypeId>) -> Self {
        self.generic_definition = Some(definition);
        self.generic_arguments = arguments;
        self
    }

    /// Makes this an array type over `element`.
    #[must_use]
    pub fn array_of(mut self, element: TypeId) -> Self {
        self.element_type = Some(element);
        self
    }

    /// Sets the base type.
    #[must_use]
    pub fn extends(mut self, base: TypeId) -> Self {
        self.base_type = Some(base);
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a property.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.properties.push(property);
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a constructor.
    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorDef) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Returns the namespace-qualified raw name (``System.Nullable`1``).
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }

    /// Returns the declared generic arity from the name suffix.
    #[must_use]
    pub fn generic_arity(&self) -> Option<usize> {
        let (_, arity) = self.name.split_once('`')?;
        arity.parse().ok()
    }

    /// Returns true if this is an array type.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.element_type.is_some()
    }

    /// Returns true if this is a by-reference type (`Int32&`).
    #[must_use]
    pub fn is_by_ref(&self) -> bool {
        self.name.ends_with('&')
    }

    /// Returns true if this is a constructed generic type.
    #[must_use]
    pub fn is_generic(&self) -> bool {
        self.generic_definition.is_some()
    }
}

/// Arena of runtime types addressed by [`TypeId`].
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    /// Root project namespace (types under it get short table paths).
    pub root_namespace: Option<String>,
    /// Type definitions, indexed by `TypeId`.
    types: Vec<TypeDef>,
    /// Catalog keys, parallel to `types`.
    keys: Vec<String>,
    /// Key lookup map.
    key_map: HashMap<String, TypeId>,
}

impl TypeCatalog {
    /// Creates a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type definition under `key` and returns its identity.
    ///
    /// A key that is already present is rebound to the new type.
    pub fn add_type(&mut self, key: impl Into<String>, type_def: TypeDef) -> TypeId {
        let key = key.into();
        let id = TypeId::from_index(self.types.len());
        self.types.push(type_def);
        self.keys.push(key.clone());
        self.key_map.insert(key, id);
        id
    }

    /// Looks up a type definition by identity.
    #[must_use]
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDef> {
        self.types.get(id.index())
    }

    /// Looks up a type definition by identity for mutation.
    pub fn get_type_mut(&mut self, id: TypeId) -> Option<&mut TypeDef> {
        self.types.get_mut(id.index())
    }

    /// Looks up a type identity by key.
    #[must_use]
    pub fn type_by_key(&self, key: &str) -> Option<TypeId> {
        self.key_map.get(key).copied()
    }

    /// Returns the key a type was registered under.
    #[must_use]
    pub fn key_of(&self, id: TypeId) -> Option<&str> {
        self.keys.get(id.index()).map(String::as_str)
    }

    /// Returns true if a type with the given key exists.
    #[must_use]
    pub fn has_type(&self, key: &str) -> bool {
        self.key_map.contains_key(key)
    }

    /// Returns the number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the catalog holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over all types in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(idx, def)| (TypeId::from_index(idx), def))
    }

    /// Returns the definition for an identity issued by this catalog.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this catalog.
    #[must_use]
    pub(crate) fn def(&self, id: TypeId) -> &TypeDef {
        &self.types[id.index()]
    }
}
