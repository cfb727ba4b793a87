//! Constructor binding generation.

use super::{Callable, EmitContext, OverloadSetGenerator, group_by};
use crate::modifiers::Modifiers;
use luameta_schema::ConstructorDef;

/// Member name of the indirect construction spelling.
pub const NEW_MEMBER: &str = "__new";

/// Generator for constructor overload sets.
pub struct ConstructorGenerator<'a> {
    constructors: &'a [ConstructorDef],
    class_name: &'a str,
    table: &'a str,
}

impl<'a> ConstructorGenerator<'a> {
    /// Creates a new constructor generator.
    #[must_use]
    pub fn new(constructors: &'a [ConstructorDef], class_name: &'a str, table: &'a str) -> Self {
        Self {
            constructors,
            class_name,
            table,
        }
    }

    /// Generates, per modifier group, a set bound to the table itself and
    /// an identical set bound to `table.__new`.
    pub fn generate(&self, ctx: &mut EmitContext<'_>) -> String {
        let mut output = String::new();
        let direct = OverloadSetGenerator::new(self.class_name, self.table);
        let indirect = OverloadSetGenerator::new(self.class_name, self.table).member(NEW_MEMBER);

        for (modifiers, group) in group_by(self.constructors, |c| Modifiers::of_constructor(c)) {
            let candidates: Vec<Callable<'_>> =
                group.into_iter().map(Callable::Constructor).collect();
            let tags = format!("---{}\n", modifiers.tags("Constructor"));

            output.push_str(&tags);
            output.push_str(&direct.generate(ctx, &candidates));
            output.push_str(&tags);
            output.push_str(&indirect.generate(ctx, &candidates));
        }

        output
    }
}
