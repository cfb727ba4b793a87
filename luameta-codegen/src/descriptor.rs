//! Type descriptors and shape classification.

use luameta_schema::{MethodDef, TypeId, TypeProvider};
use std::cell::OnceCell;
use tracing::trace;

/// Generic definition of the nullable wrapper.
pub const NULLABLE_DEFINITION: &str = "System.Nullable`1";

/// Single-argument containers rendered as `element[]`.
pub const VALUE_INDEXER_DEFINITIONS: &[&str] = &[
    "System.Collections.Generic.IEnumerable`1",
    "System.Collections.Generic.IList`1",
    "System.Collections.Generic.IReadOnlyList`1",
    "System.Collections.Generic.List`1",
    "System.Collections.Generic.HashSet`1",
    "System.Collections.Immutable.IImmutableList`1",
];

/// Two-argument containers rendered as `table<key, value>`.
pub const KEY_VALUE_INDEXER_DEFINITIONS: &[&str] = &[
    "System.Collections.Generic.IDictionary`2",
    "System.Collections.Generic.IReadOnlyDictionary`2",
    "System.Collections.Generic.Dictionary`2",
    "System.Collections.Immutable.IImmutableDictionary`2",
];

/// Parameter and return types of a delegate's invoke method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Parameter types in order.
    pub params: Vec<TypeId>,
    /// Return type, `None` for void.
    pub return_type: Option<TypeId>,
}

impl Signature {
    /// Captures the signature of a method.
    #[must_use]
    pub fn of(method: &MethodDef) -> Self {
        Self {
            params: method.params.iter().map(|p| p.ty).collect(),
            return_type: method.return_type,
        }
    }
}

/// Structural shape of a type as seen by the annotation grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Ordinary class, struct, enum or interface.
    Plain,
    /// Nullable wrapper around a payload.
    Nullable(TypeId),
    /// Array over an element type.
    ArrayIndexer(TypeId),
    /// Single-argument container.
    ValueIndexer(TypeId),
    /// Two-argument container.
    KeyValueIndexer(TypeId, TypeId),
    /// Delegate with its invoke signature.
    Delegate(Signature),
}

impl Shape {
    /// Classifies `ty`. The first matching rule wins.
    #[must_use]
    pub fn classify(provider: &dyn TypeProvider, ty: TypeId) -> Self {
        if let Some(payload) = nullable_payload(provider, ty) {
            return Self::Nullable(payload);
        }

        if let Some(element) = provider.element_type(ty) {
            return Self::ArrayIndexer(unwrap_nullable(provider, element));
        }

        if let Some(definition) = provider.generic_definition(ty) {
            let definition = provider.full_name(definition);
            let arguments = provider.generic_arguments(ty);
            if VALUE_INDEXER_DEFINITIONS.contains(&definition.as_str()) {
                if let [element, ..] = arguments {
                    return Self::ValueIndexer(unwrap_nullable(provider, *element));
                }
            }
            if KEY_VALUE_INDEXER_DEFINITIONS.contains(&definition.as_str()) {
                if let [key, value, ..] = arguments {
                    return Self::KeyValueIndexer(
                        unwrap_nullable(provider, *key),
                        unwrap_nullable(provider, *value),
                    );
                }
            }
        }

        if let Some(invoke) = provider.delegate_invoke(ty) {
            return Self::Delegate(Signature::of(invoke));
        }

        Self::Plain
    }

    /// Returns true for array and container shapes.
    #[must_use]
    pub const fn is_indexer(&self) -> bool {
        matches!(
            self,
            Self::ArrayIndexer(_) | Self::ValueIndexer(_) | Self::KeyValueIndexer(..)
        )
    }

    /// Returns true if a type of this shape gets its own document.
    #[must_use]
    pub const fn is_documentable(&self) -> bool {
        matches!(self, Self::Plain | Self::Delegate(_))
    }

    /// Every type this shape mentions, including delegate signature types.
    #[must_use]
    pub fn referenced_types(&self) -> Vec<TypeId> {
        match self {
            Self::Delegate(signature) => signature
                .params
                .iter()
                .copied()
                .chain(signature.return_type)
                .collect(),
            _ => self.structural_types(),
        }
    }

    /// Types that make up this shape's script name.
    #[must_use]
    pub fn structural_types(&self) -> Vec<TypeId> {
        match self {
            Self::Plain | Self::Delegate(_) => Vec::new(),
            Self::Nullable(inner) | Self::ArrayIndexer(inner) | Self::ValueIndexer(inner) => {
                vec![*inner]
            }
            Self::KeyValueIndexer(key, value) => vec![*key, *value],
        }
    }
}

/// Returns the payload if `ty` is a nullable wrapper.
#[must_use]
pub fn nullable_payload(provider: &dyn TypeProvider, ty: TypeId) -> Option<TypeId> {
    let definition = provider.generic_definition(ty)?;
    if provider.full_name(definition) != NULLABLE_DEFINITION {
        return None;
    }
    provider.generic_arguments(ty).first().copied()
}

/// Returns the nullable payload of `ty`, or `ty` itself.
#[must_use]
pub fn unwrap_nullable(provider: &dyn TypeProvider, ty: TypeId) -> TypeId {
    nullable_payload(provider, ty).unwrap_or(ty)
}

/// Per-type record: the classified shape plus lazily computed names.
#[derive(Debug)]
pub struct TypeDescriptor {
    original_type: TypeId,
    shape: Shape,
    pub(crate) clr_name: OnceCell<String>,
    pub(crate) clr_name_no_namespace: OnceCell<String>,
    pub(crate) script_name: OnceCell<String>,
    pub(crate) default_table: OnceCell<Vec<String>>,
}

impl TypeDescriptor {
    /// Classifies `ty` and creates an empty-cache descriptor.
    #[must_use]
    pub fn new(provider: &dyn TypeProvider, ty: TypeId) -> Self {
        let shape = Shape::classify(provider, ty);
        trace!(ty = %ty, name = provider.name(ty), ?shape, "classified type");
        Self {
            original_type: ty,
            shape,
            clr_name: OnceCell::new(),
            clr_name_no_namespace: OnceCell::new(),
            script_name: OnceCell::new(),
            default_table: OnceCell::new(),
        }
    }

    /// The type this descriptor was created for.
    #[must_use]
    pub fn original_type(&self) -> TypeId {
        self.original_type
    }

    /// The type whose name stands for this descriptor: the payload of a
    /// nullable wrapper, otherwise the original type.
    #[must_use]
    pub fn resolved_type(&self) -> TypeId {
        match self.shape {
            Shape::Nullable(payload) => payload,
            _ => self.original_type,
        }
    }

    /// The classified shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}
