//! Member definitions for catalog types.
//!
//! This module contains the data structures describing the declared members
//! of a runtime type: fields, properties, methods, constructors and their
//! parameters.

use crate::types::{TypeId, Visibility};

/// Field definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: TypeId,
    /// Field visibility.
    pub visibility: Visibility,
    /// Whether the field is static.
    pub is_static: bool,
}

impl FieldDef {
    /// Creates a new public instance field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    /// Sets the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the field as static.
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// Property accessor (getter or setter) flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accessor {
    /// Accessor visibility.
    pub visibility: Visibility,
    /// Whether the accessor is static.
    pub is_static: bool,
    /// Whether the accessor is abstract.
    pub is_abstract: bool,
    /// Whether the accessor is virtual.
    pub is_virtual: bool,
}

impl Accessor {
    /// Creates an instance accessor with the given visibility.
    #[must_use]
    pub const fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
        }
    }
}

/// Property definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Property type.
    pub ty: TypeId,
    /// Getter, if the property is readable.
    pub getter: Option<Accessor>,
    /// Setter, if the property is writable.
    pub setter: Option<Accessor>,
}

impl PropertyDef {
    /// Creates a new property without accessors.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            getter: None,
            setter: None,
        }
    }

    /// Sets the getter.
    #[must_use]
    pub fn with_getter(mut self, getter: Accessor) -> Self {
        self.getter = Some(getter);
        self
    }

    /// Sets the setter.
    #[must_use]
    pub fn with_setter(mut self, setter: Accessor) -> Self {
        self.setter = Some(setter);
        self
    }
}

/// Parameter definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDef {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub ty: TypeId,
    /// Whether the parameter carries an optional/default marker.
    pub is_optional: bool,
    /// Whether the parameter is a variadic (`params`) parameter.
    pub is_variadic: bool,
}

impl ParamDef {
    /// Creates a new required parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            is_optional: false,
            is_variadic: false,
        }
    }

    /// Marks the parameter as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Marks the parameter as variadic.
    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }
}

/// Method definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    /// Method name.
    pub name: String,
    /// Return type, `None` for void.
    pub return_type: Option<TypeId>,
    /// Parameters in declaration order.
    pub params: Vec<ParamDef>,
    /// Method visibility.
    pub visibility: Visibility,
    /// Whether the method is static.
    pub is_static: bool,
    /// Whether the method is abstract.
    pub is_abstract: bool,
    /// Whether the method is virtual.
    pub is_virtual: bool,
    /// Whether the method has a special name (operators, accessors).
    pub is_special_name: bool,
}

impl MethodDef {
    /// Creates a new public instance void method.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            params: Vec::new(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_virtual: false,
            is_special_name: false,
        }
    }

    /// Sets the return type.
    #[must_use]
    pub fn returns(mut self, ty: TypeId) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Marks the method as static.
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Marks the method as abstract (abstract methods are also virtual).
    #[must_use]
    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self.is_virtual = true;
        self
    }

    /// Marks the method as virtual.
    #[must_use]
    pub fn as_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    /// Marks the method as special-name.
    #[must_use]
    pub fn as_special_name(mut self) -> Self {
        self.is_special_name = true;
        self
    }

    /// Returns true if the method returns nothing.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.return_type.is_none()
    }
}

/// Constructor definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDef {
    /// Parameters in declaration order.
    pub params: Vec<ParamDef>,
    /// Constructor visibility.
    pub visibility: Visibility,
    /// Whether this is a static (type) initializer.
    pub is_static: bool,
}

impl ConstructorDef {
    /// Creates a new public instance constructor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: Vec::new(),
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamDef) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

impl Default for ConstructorDef {
    fn default() -> Self {
        Self::new()
    }
}
