//! Overload set rendering.
//!
//! All candidates but the last become `---@overload fun(...)` lines. The
//! last candidate alone supplies the `@param`/`@return` block and the
//! parameter names of the concrete binding, whatever its arity.

use super::EmitContext;
use crate::modifiers::Modifiers;
use luameta_schema::{ConstructorDef, MethodDef, ParamDef};

/// A method or constructor taking part in an overload set.
#[derive(Debug, Clone, Copy)]
pub enum Callable<'d> {
    /// Method overload.
    Method(&'d MethodDef),
    /// Constructor overload.
    Constructor(&'d ConstructorDef),
}

impl<'d> Callable<'d> {
    /// Declared parameters.
    #[must_use]
    pub fn params(self) -> &'d [ParamDef] {
        match self {
            Self::Method(method) => &method.params,
            Self::Constructor(constructor) => &constructor.params,
        }
    }

    /// Modifier signature used for grouping.
    #[must_use]
    pub fn modifiers(self) -> Modifiers {
        match self {
            Self::Method(method) => Modifiers::of_method(method),
            Self::Constructor(constructor) => Modifiers::of_constructor(constructor),
        }
    }
}

/// Generator for one overload set bound to one call spelling.
pub struct OverloadSetGenerator<'a> {
    class_name: &'a str,
    binding: String,
}

impl<'a> OverloadSetGenerator<'a> {
    /// Creates a generator binding to `table` itself.
    ///
    /// `class_name` is the declared return of constructor overloads.
    #[must_use]
    pub fn new(class_name: &'a str, table: &str) -> Self {
        Self {
            class_name,
            binding: table.to_string(),
        }
    }

    /// Binds to `table.member` instead of the table itself.
    #[must_use]
    pub fn member(mut self, member: &str) -> Self {
        self.binding.push('.');
        self.binding.push_str(member);
        self
    }

    /// Renders the set. Emits nothing for an empty candidate list.
    pub fn generate(&self, ctx: &mut EmitContext<'_>, candidates: &[Callable<'_>]) -> String {
        let mut output = String::new();
        let Some((primary, overloads)) = candidates.split_last() else {
            return output;
        };

        for &candidate in overloads {
            output.push_str(&self.generate_overload(ctx, candidate));
        }
        output.push_str(&self.generate_primary(ctx, *primary));

        let names: Vec<String> = primary
            .params()
            .iter()
            .map(|param| ctx.param_name(&param.name).into_owned())
            .collect();
        output.push_str(&format!(
            "{} = function({}) end\n\n",
            self.binding,
            names.join(", ")
        ));

        output
    }

    /// Renders `---@overload fun(<params>)[:<return>]`.
    fn generate_overload(&self, ctx: &mut EmitContext<'_>, candidate: Callable<'_>) -> String {
        let params: Vec<String> = candidate
            .params()
            .iter()
            .map(|param| {
                let script = ctx.script_name(param.ty);
                if param.is_variadic {
                    format!("...:{}", variadic_element(&script))
                } else {
                    format!("{}:{}", annotated_name(ctx, param), script)
                }
            })
            .collect();

        let mut line = format!("---@overload fun({})", params.join(", "));
        if let Some(ret) = self.return_name(ctx, candidate) {
            line.push(':');
            line.push_str(&ret);
        }
        line.push('\n');
        line
    }

    /// Renders the `@param`/`@return` block of the binding candidate.
    fn generate_primary(&self, ctx: &mut EmitContext<'_>, candidate: Callable<'_>) -> String {
        let mut output = String::new();
        for param in candidate.params() {
            let script = ctx.script_name(param.ty);
            let name = if param.is_variadic {
                "...".to_string()
            } else {
                annotated_name(ctx, param)
            };
            output.push_str(&format!("---@param {} {}\n", name, script));
        }
        if let Some(ret) = self.return_name(ctx, candidate) {
            output.push_str(&format!("---@return {}\n", ret));
        }
        output
    }

    fn return_name(&self, ctx: &mut EmitContext<'_>, candidate: Callable<'_>) -> Option<String> {
        match candidate {
            Callable::Method(method) => method.return_type.map(|ty| ctx.script_name(ty)),
            Callable::Constructor(_) => Some(self.class_name.to_string()),
        }
    }
}

/// Parameter name with the optional marker.
fn annotated_name(ctx: &EmitContext<'_>, param: &ParamDef) -> String {
    let mut name = ctx.param_name(&param.name).into_owned();
    if param.is_optional {
        name.push('?');
    }
    name
}

/// Element script type of a variadic parameter.
fn variadic_element(script: &str) -> &str {
    script.strip_suffix("[]").unwrap_or(script)
}
