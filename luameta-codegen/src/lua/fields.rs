//! Field annotation generation.

use super::EmitContext;
use crate::modifiers::field_tags;
use luameta_schema::FieldDef;

/// Generator for `@field` annotations of declared fields.
pub struct FieldGenerator<'a> {
    fields: &'a [FieldDef],
}

impl<'a> FieldGenerator<'a> {
    /// Creates a new field generator.
    #[must_use]
    pub fn new(fields: &'a [FieldDef]) -> Self {
        Self { fields }
    }

    /// Generates annotations for every field except property backing fields.
    pub fn generate(&self, ctx: &mut EmitContext<'_>) -> String {
        let mut output = String::new();

        for field in self.fields {
            if ctx.config().is_backing_field(&field.name) {
                continue;
            }
            let script = ctx.script_name(field.ty);
            output.push_str(&format!("---{}\n", field_tags(field)));
            output.push_str(&format!("---@field {} {}\n", field.name, script));
        }

        output
    }
}
