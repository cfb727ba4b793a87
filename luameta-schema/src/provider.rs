//! Type introspection capability set.
//!
//! The generator never touches a concrete reflection API. Everything it needs
//! to know about a runtime type goes through [`TypeProvider`], implemented
//! once per host introspection facility. [`TypeCatalog`] is the bundled,
//! in-memory implementation.

use crate::members::{ConstructorDef, FieldDef, MethodDef, PropertyDef};
use crate::types::{TypeCatalog, TypeId};

/// Full name of the delegate base type.
pub const DELEGATE_TYPE_NAME: &str = "System.Delegate";

/// Name of the method carrying a delegate's signature.
pub const DELEGATE_INVOKE_METHOD: &str = "Invoke";

/// Read-only introspection over a closed set of runtime types.
///
/// Identities passed in must have been issued by the same provider;
/// implementations may panic otherwise.
pub trait TypeProvider {
    /// Simple name, including generic arity suffix and decoration.
    fn name(&self, ty: TypeId) -> &str;

    /// Namespace, if any.
    fn namespace(&self, ty: TypeId) -> Option<&str>;

    /// Directly enclosing type of a nested type.
    fn declaring_type(&self, ty: TypeId) -> Option<TypeId>;

    /// Generic definition of a constructed generic type.
    fn generic_definition(&self, ty: TypeId) -> Option<TypeId>;

    /// Generic arguments of a constructed generic type.
    fn generic_arguments(&self, ty: TypeId) -> &[TypeId];

    /// Element type of an array type.
    fn element_type(&self, ty: TypeId) -> Option<TypeId>;

    /// Base type.
    fn base_type(&self, ty: TypeId) -> Option<TypeId>;

    /// Declared fields.
    fn fields(&self, ty: TypeId) -> &[FieldDef];

    /// Declared properties.
    fn properties(&self, ty: TypeId) -> &[PropertyDef];

    /// Declared methods.
    fn methods(&self, ty: TypeId) -> &[MethodDef];

    /// Declared constructors.
    fn constructors(&self, ty: TypeId) -> &[ConstructorDef];

    /// Namespace-qualified raw name (``System.Collections.Generic.List`1``).
    fn full_name(&self, ty: TypeId) -> String {
        match self.namespace(ty) {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name(ty)),
            _ => self.name(ty).to_string(),
        }
    }

    /// Returns true if `ty` strictly derives from the type named `full_name`.
    fn is_subclass_of(&self, ty: TypeId, full_name: &str) -> bool {
        let mut current = self.base_type(ty);
        let mut steps = 0;
        while let Some(base) = current {
            if self.full_name(base) == full_name {
                return true;
            }
            // A well-formed hierarchy never revisits a type; stop on malformed input.
            steps += 1;
            if base == ty || steps > 4096 {
                return false;
            }
            current = self.base_type(base);
        }
        false
    }

    /// Finds the first declared method with the given name.
    fn find_method(&self, ty: TypeId, name: &str) -> Option<&MethodDef> {
        self.methods(ty).iter().find(|m| m.name == name)
    }

    /// Returns the invoke method if `ty` is a delegate type.
    fn delegate_invoke(&self, ty: TypeId) -> Option<&MethodDef> {
        if self.is_subclass_of(ty, DELEGATE_TYPE_NAME) {
            self.find_method(ty, DELEGATE_INVOKE_METHOD)
        } else {
            None
        }
    }
}

impl TypeProvider for TypeCatalog {
    fn name(&self, ty: TypeId) -> &str {
        &self.def(ty).name
    }

    fn namespace(&self, ty: TypeId) -> Option<&str> {
        self.def(ty).namespace.as_deref()
    }

    fn declaring_type(&self, ty: TypeId) -> Option<TypeId> {
        self.def(ty).declaring_type
    }

    fn generic_definition(&self, ty: TypeId) -> Option<TypeId> {
        self.def(ty).generic_definition
    }

    fn generic_arguments(&self, ty: TypeId) -> &[TypeId] {
        &self.def(ty).generic_arguments
    }

    fn element_type(&self, ty: TypeId) -> Option<TypeId> {
        self.def(ty).element_type
    }

    fn base_type(&self, ty: TypeId) -> Option<TypeId> {
        self.def(ty).base_type
    }

    fn fields(&self, ty: TypeId) -> &[FieldDef] {
        &self.def(ty).fields
    }

    fn properties(&self, ty: TypeId) -> &[PropertyDef] {
        &self.def(ty).properties
    }

    fn methods(&self, ty: TypeId) -> &[MethodDef] {
        &self.def(ty).methods
    }

    fn constructors(&self, ty: TypeId) -> &[ConstructorDef] {
        &self.def(ty).constructors
    }
}
