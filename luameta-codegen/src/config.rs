//! Generator configuration.

use luameta_schema::TypeCatalog;

/// Root namespace of the scripted project.
pub const DEFAULT_ROOT_NAMESPACE: &str = "Barotrauma";

/// Prefix applied to parameter names that collide with Lua keywords.
pub const DEFAULT_RESERVED_PREFIX: &str = "luaKey__";

/// Name fragment of compiler-synthesized property backing fields.
pub const DEFAULT_BACKING_FIELD_MARKER: &str = ">k__BackingField";

/// Settings for a generation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    root_namespace: String,
    reserved_prefix: String,
    backing_field_marker: String,
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root_namespace: DEFAULT_ROOT_NAMESPACE.to_string(),
            reserved_prefix: DEFAULT_RESERVED_PREFIX.to_string(),
            backing_field_marker: DEFAULT_BACKING_FIELD_MARKER.to_string(),
        }
    }

    /// Creates a default configuration adopting the catalog's root namespace.
    #[must_use]
    pub fn for_catalog(catalog: &TypeCatalog) -> Self {
        match &catalog.root_namespace {
            Some(namespace) => Self::new().root_namespace(namespace.clone()),
            None => Self::new(),
        }
    }

    /// Sets the root namespace. Types whose namespace starts with it are
    /// placed directly under the global table.
    #[must_use]
    pub fn root_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.root_namespace = namespace.into();
        self
    }

    /// Sets the prefix for parameter names that are Lua keywords.
    #[must_use]
    pub fn reserved_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reserved_prefix = prefix.into();
        self
    }

    /// Sets the marker identifying property backing fields.
    #[must_use]
    pub fn backing_field_marker(mut self, marker: impl Into<String>) -> Self {
        self.backing_field_marker = marker.into();
        self
    }

    /// Returns the root namespace.
    #[must_use]
    pub fn get_root_namespace(&self) -> &str {
        &self.root_namespace
    }

    /// Returns the reserved-word prefix.
    #[must_use]
    pub fn get_reserved_prefix(&self) -> &str {
        &self.reserved_prefix
    }

    /// Returns the backing field marker.
    #[must_use]
    pub fn get_backing_field_marker(&self) -> &str {
        &self.backing_field_marker
    }

    /// Returns true if a field with this name is a property backing field.
    #[must_use]
    pub fn is_backing_field(&self, name: &str) -> bool {
        name.contains(&self.backing_field_marker)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
