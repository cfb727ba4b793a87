//! Name resolution for runtime types.
//!
//! Qualified names flatten namespaces, enclosing types and generic arguments
//! into one identifier the annotation tool accepts. Generic arguments are
//! spliced in with a `*{depth}` marker so that `Dictionary<string, List<int>>`
//! and `Dictionary<List<string>, int>` never collide.

use luameta_schema::{TypeId, TypeProvider};
use std::borrow::Cow;

/// Reserved words of the target scripting language.
pub const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Options controlling qualified name rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOptions {
    /// Rendering a generic argument: segments are joined with `*`.
    pub is_generic_argument: bool,
    /// Prefix the namespace.
    pub contain_namespace: bool,
    /// Prefix the chain of enclosing types.
    pub include_declaring_type: bool,
    /// Nesting depth of generic arguments, starting at 1.
    pub depth: usize,
}

impl NameOptions {
    /// Options for a top-level name without namespace.
    #[must_use]
    pub fn without_namespace() -> Self {
        Self {
            contain_namespace: false,
            ..Self::default()
        }
    }

    fn separator(self) -> &'static str {
        if self.is_generic_argument { "*" } else { "." }
    }
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            is_generic_argument: false,
            contain_namespace: true,
            include_declaring_type: true,
            depth: 1,
        }
    }
}

/// Renders the qualified name of `ty`.
#[must_use]
pub fn clr_name(provider: &dyn TypeProvider, ty: TypeId, options: NameOptions) -> String {
    let separator = options.separator();
    let mut name = String::new();

    if options.contain_namespace {
        if let Some(namespace) = provider.namespace(ty).filter(|ns| !ns.is_empty()) {
            name.push_str(&namespace.replace('.', separator));
            name.push_str(separator);
        }
    }

    if options.include_declaring_type {
        let mut chain = Vec::new();
        let mut current = provider.declaring_type(ty);
        while let Some(declaring) = current {
            chain.push(declaring);
            current = provider.declaring_type(declaring);
        }
        let enclosing = NameOptions {
            contain_namespace: false,
            include_declaring_type: false,
            ..NameOptions::default()
        };
        for &declaring in chain.iter().rev() {
            name.push_str(&clr_name(provider, declaring, enclosing));
            name.push_str(separator);
        }
    }

    name.push_str(&simple_name(provider.name(ty)));

    for &argument in provider.generic_arguments(ty) {
        name.push_str(&format!("*{}", options.depth));
        name.push_str(&clr_name(
            provider,
            argument,
            NameOptions {
                is_generic_argument: true,
                contain_namespace: true,
                include_declaring_type: true,
                depth: options.depth + 1,
            },
        ));
    }

    name
}

/// Strips the generic arity suffix and by-ref/array decoration from a raw name.
fn simple_name(raw: &str) -> String {
    let base = raw.find('`').map_or(raw, |idx| &raw[..idx]);
    base.replace('&', "").replace("[]", "")
}

/// Computes the table path of a type.
///
/// Types living under `root_namespace` are addressed by their name alone;
/// everything else keeps its namespace segments.
#[must_use]
pub fn table_path(
    namespace: Option<&str>,
    name_without_namespace: &str,
    root_namespace: &str,
) -> Vec<String> {
    let mut path = Vec::new();
    if let Some(namespace) = namespace.filter(|ns| !ns.is_empty()) {
        if namespace.split('.').next() != Some(root_namespace) {
            path.extend(namespace.split('.').map(str::to_string));
        }
    }
    path.extend(name_without_namespace.split('.').map(str::to_string));
    path
}

/// Renders a table path as global-table indexing: `_G['a']['b']`.
#[must_use]
pub fn global_table<S: AsRef<str>>(path: &[S]) -> String {
    let mut table = String::from("_G");
    for segment in path {
        table.push_str(&format!("['{}']", segment.as_ref()));
    }
    table
}

/// Returns true if `name` is a reserved word of the scripting language.
#[must_use]
pub fn is_lua_keyword(name: &str) -> bool {
    LUA_KEYWORDS.contains(&name)
}

/// Prefixes `name` with `prefix` when it is a reserved word.
#[must_use]
pub fn non_conflict_name<'a>(name: &'a str, prefix: &str) -> Cow<'a, str> {
    if is_lua_keyword(name) {
        Cow::Owned(format!("{prefix}{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use luameta_schema::{TypeCatalog, TypeDef};

    fn generic_catalog() -> (TypeCatalog, TypeId, TypeId) {
        let mut catalog = TypeCatalog::new();
        let string = catalog.add_type("string", TypeDef::new("String").in_namespace("System"));
        let int = catalog.add_type("int", TypeDef::new("Int32").in_namespace("System"));
        let list = catalog.add_type(
            "list",
            TypeDef::new("List`1").in_namespace("System.Collections.Generic"),
        );
        let list_int = catalog.add_type(
            "list_int",
            TypeDef::new("List`1")
                .in_namespace("System.Collections.Generic")
                .generic(list, vec![int]),
        );
        let dict = catalog.add_type(
            "dict",
            TypeDef::new("Dictionary`2").in_namespace("System.Collections.Generic"),
        );
        let dict_string_list = catalog.add_type(
            "dict_string_list",
            TypeDef::new("Dictionary`2")
                .in_namespace("System.Collections.Generic")
                .generic(dict, vec![string, list_int]),
        );
        (catalog, list_int, dict_string_list)
    }

    #[test]
    fn test_generic_names_carry_depth() {
        let (catalog, list_int, dict) = generic_catalog();

        assert_eq!(
            clr_name(&catalog, list_int, NameOptions::default()),
            "System.Collections.Generic.List*1System*Int32"
        );
        assert_eq!(
            clr_name(&catalog, dict, NameOptions::default()),
            "System.Collections.Generic.Dictionary*1System*String\
             *1System*Collections*Generic*List*2System*Int32"
        );
        assert_eq!(
            clr_name(&catalog, list_int, NameOptions::without_namespace()),
            "List*1System*Int32"
        );
    }

    #[test]
    fn test_nested_type_name() {
        let mut catalog = TypeCatalog::new();
        let outer = catalog.add_type("Outer", TypeDef::new("Outer").in_namespace("Barotrauma"));
        let inner = catalog.add_type(
            "Inner",
            TypeDef::new("Inner").in_namespace("Barotrauma").nested_in(outer),
        );
        let leaf = catalog.add_type(
            "Leaf",
            TypeDef::new("Leaf").in_namespace("Barotrauma").nested_in(inner),
        );

        assert_eq!(
            clr_name(&catalog, leaf, NameOptions::default()),
            "Barotrauma.Outer.Inner.Leaf"
        );
        assert_eq!(
            clr_name(&catalog, leaf, NameOptions::without_namespace()),
            "Outer.Inner.Leaf"
        );
    }

    #[test]
    fn test_decoration_is_stripped() {
        let mut catalog = TypeCatalog::new();
        let int = catalog.add_type("int", TypeDef::new("Int32").in_namespace("System"));
        let by_ref = catalog.add_type("int&", TypeDef::new("Int32&").in_namespace("System"));
        let array = catalog.add_type(
            "int[]",
            TypeDef::new("Int32[]").in_namespace("System").array_of(int),
        );

        assert_eq!(clr_name(&catalog, by_ref, NameOptions::default()), "System.Int32");
        assert_eq!(clr_name(&catalog, array, NameOptions::default()), "System.Int32");
    }

    #[test]
    fn test_table_path() {
        assert_eq!(
            table_path(Some("Barotrauma.Items"), "Item", "Barotrauma"),
            vec!["Item"]
        );
        assert_eq!(
            table_path(Some("Barotrauma"), "Outer.Inner", "Barotrauma"),
            vec!["Outer", "Inner"]
        );
        assert_eq!(
            table_path(Some("System.Collections"), "ArrayList", "Barotrauma"),
            vec!["System", "Collections", "ArrayList"]
        );
        assert_eq!(table_path(None, "Global", "Barotrauma"), vec!["Global"]);
    }

    #[test]
    fn test_global_table() {
        assert_eq!(global_table(&["System", "Int32"]), "_G['System']['Int32']");
        assert_eq!(global_table::<&str>(&[]), "_G");
    }

    #[test]
    fn test_non_conflict_name() {
        assert_eq!(non_conflict_name("end", "luaKey__"), "luaKey__end");
        assert_eq!(non_conflict_name("function", "luaKey__"), "luaKey__function");
        assert_eq!(non_conflict_name("amount", "luaKey__"), "amount");
        assert!(is_lua_keyword("goto"));
        assert!(!is_lua_keyword("self"));
    }
}
