//! Property annotation generation.

use super::EmitContext;
use crate::modifiers::Modifiers;
use luameta_schema::PropertyDef;

/// Generator for accessor tags and `@field` annotations of properties.
pub struct PropertyGenerator<'a> {
    properties: &'a [PropertyDef],
}

impl<'a> PropertyGenerator<'a> {
    /// Creates a new property generator.
    #[must_use]
    pub fn new(properties: &'a [PropertyDef]) -> Self {
        Self { properties }
    }

    /// Generates annotations for every property.
    pub fn generate(&self, ctx: &mut EmitContext<'_>) -> String {
        let mut output = String::new();

        for property in self.properties {
            let script = ctx.script_name(property.ty);
            if let Some(getter) = &property.getter {
                output.push_str(&format!("---{}\n", Modifiers::of_accessor(getter).tags("Getter")));
            }
            if let Some(setter) = &property.setter {
                output.push_str(&format!(
                    "---<br/>{}\n",
                    Modifiers::of_accessor(setter).tags("Setter")
                ));
            }
            output.push_str(&format!("---@field {} {}\n", property.name, script));
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
    use luameta_schema::{Accessor, Visibility};

    #[test]
    fn test_property_annotations() {
        let p = primitives();
        let properties = [
            PropertyDef::new("Name", p.string)
                .with_getter(Accessor::new(Visibility::Public))
                .with_setter(Accessor::new(Visibility::Private)),
            PropertyDef::new("Ids", p.int_array).with_getter(Accessor {
                is_static: true,
                ..Accessor::new(Visibility::Public)
            }),
        ];

        let mut registry = Registry::new();
        let config = GeneratorConfig::default();
        let mut ctx = EmitContext::new(&p.catalog, &mut registry, &config);
        let output = PropertyGenerator::new(&properties).generate(&mut ctx);

        assert_eq!(
            output,
            "---`Getter Public Instance`\n\
             ---<br/>`Setter Private Instance`\n\
             ---@field Name string\n\
             ---`Getter Public Static`\n\
             ---@field Ids int[]\n"
        );
    }

    #[test]
    fn test_write_only_property() {
        let p = primitives();
        let properties = [PropertyDef::new("Secret", p.int).with_setter(Accessor::default())];

        let mut registry = Registry::new();
        let config = GeneratorConfig::default();
        let mut ctx = EmitContext::new(&p.catalog, &mut registry, &config);
        let output = PropertyGenerator::new(&properties).generate(&mut ctx);

        assert_eq!(
            output,
            "---<br/>`Setter Public Instance`\n---@field Secret int\n"
        );
    }
}
