//! Modifier signatures used to group overloads.

use bitflags::bitflags;
use luameta_schema::{Accessor, ConstructorDef, FieldDef, MethodDef, Visibility};

bitflags! {
    /// Visibility, static, abstract and virtual bits of a callable member.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Modifiers: u8 {
        const PUBLIC   = 0x01;
        const PRIVATE  = 0x02;
        const STATIC   = 0x04;
        const ABSTRACT = 0x08;
        const VIRTUAL  = 0x10;
    }
}

impl Modifiers {
    /// Builds a signature from raw member flags.
    #[must_use]
    pub fn from_parts(
        visibility: Visibility,
        is_static: bool,
        is_abstract: bool,
        is_virtual: bool,
    ) -> Self {
        let mut bits = Self::empty();
        bits.set(Self::PUBLIC, visibility.is_public());
        bits.set(Self::PRIVATE, visibility.is_private());
        bits.set(Self::STATIC, is_static);
        bits.set(Self::ABSTRACT, is_abstract);
        bits.set(Self::VIRTUAL, is_virtual);
        bits
    }

    /// Signature of a method.
    #[must_use]
    pub fn of_method(method: &MethodDef) -> Self {
        Self::from_parts(
            method.visibility,
            method.is_static,
            method.is_abstract,
            method.is_virtual,
        )
    }

    /// Signature of a property accessor.
    #[must_use]
    pub fn of_accessor(accessor: &Accessor) -> Self {
        Self::from_parts(
            accessor.visibility,
            accessor.is_static,
            accessor.is_abstract,
            accessor.is_virtual,
        )
    }

    /// Signature of a constructor.
    #[must_use]
    pub fn of_constructor(constructor: &ConstructorDef) -> Self {
        Self::from_parts(constructor.visibility, constructor.is_static, false, false)
    }

    /// Renders the backtick-quoted tag annotation, e.g. ``"`Method Public Static`"``.
    #[must_use]
    pub fn tags(self, kind: &str) -> String {
        let mut tags = format!("`{} {} {}", kind, self.visibility_tag(), self.storage_tag());
        if self.contains(Self::ABSTRACT) {
            tags.push_str(" Abstract");
        }
        if self.contains(Self::VIRTUAL) {
            tags.push_str(" Virtual");
        }
        tags.push('`');
        tags
    }

    fn visibility_tag(self) -> &'static str {
        if self.contains(Self::PUBLIC) {
            "Public"
        } else if self.contains(Self::PRIVATE) {
            "Private"
        } else {
            "NonPublic"
        }
    }

    fn storage_tag(self) -> &'static str {
        if self.contains(Self::STATIC) {
            "Static"
        } else {
            "Instance"
        }
    }
}

/// Renders the tag annotation of a field. Fields carry no abstract/virtual bits.
#[must_use]
pub fn field_tags(field: &FieldDef) -> String {
    Modifiers::from_parts(field.visibility, field.is_static, false, false).tags("Field")
}
