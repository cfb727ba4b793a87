//! Method binding generation.

use super::{Callable, EmitContext, OverloadSetGenerator, group_by};
use crate::modifiers::Modifiers;
use luameta_schema::MethodDef;

/// Generator for method overload sets.
///
/// Only protected, non-special-name methods are bound. Operators and property
/// accessors are special-name.
pub struct MethodGenerator<'a> {
    methods: &'a [MethodDef],
    class_name: &'a str,
    table: &'a str,
}

impl<'a> MethodGenerator<'a> {
    /// Creates a new method generator.
    #[must_use]
    pub fn new(methods: &'a [MethodDef], class_name: &'a str, table: &'a str) -> Self {
        Self {
            methods,
            class_name,
            table,
        }
    }

    /// Returns true if `method` gets a binding.
    #[must_use]
    pub fn is_bound(method: &MethodDef) -> bool {
        method.visibility.is_family() && !method.is_special_name
    }

    /// Generates one tag line and overload set per (name, modifiers) group.
    pub fn generate(&self, ctx: &mut EmitContext<'_>) -> String {
        let mut output = String::new();
        let bound = self.methods.iter().filter(|m| Self::is_bound(m));

        for (name, overloads) in group_by(bound, |m| m.name.clone()) {
            let set = OverloadSetGenerator::new(self.class_name, self.table).member(&name);
            for (modifiers, group) in group_by(overloads, |m| Modifiers::of_method(m)) {
                let candidates: Vec<Callable<'_>> =
                    group.into_iter().map(Callable::Method).collect();
                output.push_str(&format!("---{}\n", modifiers.tags("Method")));
                output.push_str(&set.generate(ctx, &candidates));
            }
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::lua::test_support::primitives;
    use crate::registry::Registry;
    use luameta_schema::{ParamDef, Visibility};

    fn family(name: &str) -> MethodDef {
        MethodDef::new(name).with_visibility(Visibility::Family)
    }

    #[test]
    fn test_only_family_methods_are_bound() {
        let p = primitives();
        let methods = [
            MethodDef::new("PublicApi"),
            family("get_Name").as_special_name(),
            family("Hidden").with_visibility(Visibility::Private),
            family("OnUpdate").param(ParamDef::new("dt", p.int)),
        ];

        let mut registry = Registry::new();
        let config = GeneratorConfig::default();
        let mut ctx = EmitContext::new(&p.catalog, &mut registry, &config);
        let output = MethodGenerator::new(&methods, "Item", "Item").generate(&mut ctx);

        assert_eq!(
            output,
            "---`Method NonPublic Instance`\n\
             ---@param dt int\n\
             Item.OnUpdate = function(dt) end\n\n"
        );
    }

    #[test]
    fn test_groups_by_name_then_modifiers() {
        let p = primitives();
        let methods = [
            family("Apply").param(ParamDef::new("a", p.int)),
            family("Create").as_static().returns(p.string),
            family("Apply").as_static().param(ParamDef::new("s", p.string)),
            family("Apply").param(ParamDef::new("b", p.bool_)),
        ];

        let mut registry = Registry::new();
        let config = GeneratorConfig::default();
        let mut ctx = EmitContext::new(&p.catalog, &mut registry, &config);
        let output = MethodGenerator::new(&methods, "T", "T").generate(&mut ctx);

        assert_eq!(
            output,
            "---`Method NonPublic Instance`\n\
             ---@overload fun(a:int)\n\
             ---@param b bool\n\
             T.Apply = function(b) end\n\n\
             ---`Method NonPublic Static`\n\
             ---@param s string\n\
             T.Apply = function(s) end\n\n\
             ---`Method NonPublic Static`\n\
             ---@return string\n\
             T.Create = function() end\n\n"
        );
    }

    #[test]
    fn test_abstract_virtual_tags() {
        let p = primitives();
        let methods = [family("Think").as_abstract()];

        let mut registry = Registry::new();
        let config = GeneratorConfig::default();
        let mut ctx = EmitContext::new(&p.catalog, &mut registry, &config);
        let output = MethodGenerator::new(&methods, "T", "T").generate(&mut ctx);

        assert!(output.starts_with("---`Method NonPublic Instance Abstract Virtual`\n"));
    }
}
