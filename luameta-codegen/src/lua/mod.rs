//! Annotation generation modules.

pub mod constructors;
pub mod fields;
pub mod methods;
pub mod overloads;
pub mod properties;

pub use constructors::ConstructorGenerator;
pub use fields::FieldGenerator;
pub use methods::MethodGenerator;
pub use overloads::{Callable, OverloadSetGenerator};
pub use properties::PropertyGenerator;

use crate::config::GeneratorConfig;
use crate::names;
use crate::registry::Registry;
use luameta_schema::{TypeId, TypeProvider};
use std::borrow::Cow;

/// State shared by the member generators of one document.
pub struct EmitContext<'a> {
    provider: &'a dyn TypeProvider,
    registry: &'a mut Registry,
    config: &'a GeneratorConfig,
}

impl<'a> EmitContext<'a> {
    /// Creates a context over a session's registry.
    pub fn new(
        provider: &'a dyn TypeProvider,
        registry: &'a mut Registry,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Script name of a referenced member type. The type is collected to
    /// the global table graph as a side effect.
    pub fn script_name(&mut self, ty: TypeId) -> String {
        let id = self.registry.obtain(self.provider, ty);
        self.registry.collect_to_global(self.provider, id);
        self.registry.script_name(self.provider, id)
    }

    /// Parameter name safe to use as a Lua identifier.
    #[must_use]
    pub fn param_name<'n>(&self, name: &'n str) -> Cow<'n, str> {
        names::non_conflict_name(name, self.config.get_reserved_prefix())
    }
}

/// Groups items by key, keeping groups and their members in first-appearance order.
pub(crate) fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_keeps_first_appearance_order() {
        let groups = group_by(["b1", "a1", "b2", "c1", "a2"], |s| s.chars().next());
        assert_eq!(
            groups,
            vec![
                (Some('b'), vec!["b1", "b2"]),
                (Some('a'), vec!["a1", "a2"]),
                (Some('c'), vec!["c1"]),
            ]
        );
    }

    #[test]
    fn test_param_name_prefix() {
        let catalog = luameta_schema::TypeCatalog::new();
        let mut registry = Registry::new();
        let config = GeneratorConfig::default();
        let ctx = EmitContext::new(&catalog, &mut registry, &config);

        assert_eq!(ctx.param_name("end"), "luaKey__end");
        assert_eq!(ctx.param_name("target"), "target");
    }
}
