//! Descriptor registry.
//!
//! One descriptor per type identity. Descriptors are inserted before the
//! types they reference are obtained, so self-referential and mutually
//! recursive types terminate.

use crate::descriptor::{Shape, TypeDescriptor};
use crate::names::{self, NameOptions};
use luameta_schema::{TypeId, TypeProvider};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Handle of a descriptor inside a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u32);

impl DescriptorId {
    /// Creates a handle from a registry index.
    ///
    /// # Panics
    /// Panics if `index` does not fit in 32 bits.
    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).expect("descriptor index overflows u32"))
    }

    /// Returns the registry index of this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Base side of an inheritance edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseLink {
    /// The derived type has no base type.
    Empty,
    /// The derived type extends this descriptor.
    Type(DescriptorId),
}

/// Identity-keyed store of descriptors and discovered inheritance edges.
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: Vec<TypeDescriptor>,
    by_type: HashMap<TypeId, DescriptorId>,
    base_pairs: Vec<(DescriptorId, BaseLink)>,
    based: HashSet<DescriptorId>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the descriptor for `ty`, creating it and every type its shape
    /// references on first use.
    pub fn obtain(&mut self, provider: &dyn TypeProvider, ty: TypeId) -> DescriptorId {
        if let Some(id) = self.quick_retrieve(ty) {
            return id;
        }

        let descriptor = TypeDescriptor::new(provider, ty);
        let referenced = descriptor.shape().referenced_types();
        let id = DescriptorId::from_index(self.descriptors.len());
        trace!(ty = %ty, descriptor = id.index(), "created descriptor");
        self.descriptors.push(descriptor);
        self.by_type.insert(ty, id);

        for referenced in referenced {
            self.obtain(provider, referenced);
        }
        id
    }

    /// Looks up an existing descriptor without creating one.
    #[must_use]
    pub fn quick_retrieve(&self, ty: TypeId) -> Option<DescriptorId> {
        self.by_type.get(&ty).copied()
    }

    /// Returns a descriptor by handle.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this registry.
    #[must_use]
    pub fn descriptor(&self, id: DescriptorId) -> &TypeDescriptor {
        &self.descriptors[id.index()]
    }

    /// Returns a descriptor by handle, if it exists.
    #[must_use]
    pub fn get(&self, id: DescriptorId) -> Option<&TypeDescriptor> {
        self.descriptors.get(id.index())
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no descriptor was created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Qualified name of the descriptor's resolved type.
    pub fn clr_name(&self, provider: &dyn TypeProvider, id: DescriptorId) -> &str {
        let descriptor = self.descriptor(id);
        descriptor.clr_name.get_or_init(|| {
            names::clr_name(provider, descriptor.resolved_type(), NameOptions::default())
        })
    }

    /// Qualified name of the descriptor's resolved type, without namespace.
    pub fn clr_name_no_namespace(&self, provider: &dyn TypeProvider, id: DescriptorId) -> &str {
        let descriptor = self.descriptor(id);
        descriptor.clr_name_no_namespace.get_or_init(|| {
            names::clr_name(
                provider,
                descriptor.resolved_type(),
                NameOptions::without_namespace(),
            )
        })
    }

    /// Name of the descriptor in the annotation grammar.
    pub fn script_name(&mut self, provider: &dyn TypeProvider, id: DescriptorId) -> String {
        if let Some(name) = self.descriptor(id).script_name.get() {
            return name.clone();
        }

        let name = match self.descriptor(id).shape().clone() {
            Shape::Plain | Shape::Delegate(_) => self.clr_name(provider, id).to_string(),
            Shape::Nullable(payload) => {
                let payload = self.obtain(provider, payload);
                self.script_name(provider, payload)
            }
            Shape::ArrayIndexer(element) | Shape::ValueIndexer(element) => {
                let element = self.obtain(provider, element);
                format!("{}[]", self.script_name(provider, element))
            }
            Shape::KeyValueIndexer(key, value) => {
                let key = self.obtain(provider, key);
                let value = self.obtain(provider, value);
                format!(
                    "table<{}, {}>",
                    self.script_name(provider, key),
                    self.script_name(provider, value)
                )
            }
        };

        self.descriptor(id).script_name.get_or_init(|| name).clone()
    }

    /// Table path the descriptor's bindings live under.
    pub fn default_table(
        &self,
        provider: &dyn TypeProvider,
        id: DescriptorId,
        root_namespace: &str,
    ) -> &[String] {
        let descriptor = self.descriptor(id);
        descriptor.default_table.get_or_init(|| {
            names::table_path(
                provider.namespace(descriptor.resolved_type()),
                self.clr_name_no_namespace(provider, id),
                root_namespace,
            )
        })
    }

    /// Records the inheritance edge of `derived`. Returns false if one was
    /// already recorded.
    pub fn record_base_pair(&mut self, derived: DescriptorId, base: BaseLink) -> bool {
        if !self.based.insert(derived) {
            return false;
        }
        self.base_pairs.push((derived, base));
        true
    }

    /// Inheritance edges in discovery order.
    #[must_use]
    pub fn base_pairs(&self) -> &[(DescriptorId, BaseLink)] {
        &self.base_pairs
    }

    /// Returns the recorded base of `derived`, if any edge was recorded.
    #[must_use]
    pub fn base_of(&self, derived: DescriptorId) -> Option<BaseLink> {
        self.base_pairs
            .iter()
            .find(|(d, _)| *d == derived)
            .map(|(_, base)| *base)
    }

    /// Records base pairs for `id`, its base chain and every type its shape
    /// is built from. Each descriptor is visited once.
    pub fn collect_to_global(&mut self, provider: &dyn TypeProvider, id: DescriptorId) {
        let mut pending = vec![id];

        while let Some(current) = pending.pop() {
            if self.based.contains(&current) {
                continue;
            }

            let resolved = self.descriptor(current).resolved_type();
            let mut next = Vec::new();
            let base = match provider.base_type(resolved) {
                Some(base) => {
                    let base = self.obtain(provider, base);
                    next.push(base);
                    BaseLink::Type(base)
                }
                None => BaseLink::Empty,
            };
            self.record_base_pair(current, base);

            for ty in self.descriptor(current).shape().structural_types() {
                next.push(self.obtain(provider, ty));
            }
            // Depth-first: base chain before shape members.
            pending.extend(next.into_iter().rev());
        }
    }
}
