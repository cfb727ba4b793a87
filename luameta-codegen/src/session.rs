//! Document builder.
//!
//! A [`Session`] owns every piece of mutable generation state: the
//! descriptor registry, the documents emitted so far and the set of types
//! currently being generated. Several roots generated in one session share
//! descriptors and never produce two documents for one type.

use crate::config::GeneratorConfig;
use crate::document::{Document, DocumentSink};
use crate::error::CodegenError;
use crate::lua::{
    ConstructorGenerator, EmitContext, FieldGenerator, MethodGenerator, PropertyGenerator,
};
use crate::names;
use crate::registry::{DescriptorId, Registry};
use luameta_schema::{TypeId, TypeProvider};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Generation session over one type provider.
pub struct Session<'a> {
    provider: &'a dyn TypeProvider,
    config: GeneratorConfig,
    registry: Registry,
    documents: Vec<Document>,
    emitted: HashMap<TypeId, usize>,
    /// Types whose document is being built. Member emission does not call
    /// back into `generate` today; this guards re-entrant callers such as a
    /// sink or provider that requests another document mid-generation.
    in_progress: HashSet<TypeId>,
}

impl<'a> Session<'a> {
    /// Creates a session with default configuration.
    #[must_use]
    pub fn new(provider: &'a dyn TypeProvider) -> Self {
        Self::with_config(provider, GeneratorConfig::default())
    }

    /// Creates a session with the given configuration.
    #[must_use]
    pub fn with_config(provider: &'a dyn TypeProvider, config: GeneratorConfig) -> Self {
        Self {
            provider,
            config,
            registry: Registry::new(),
            documents: Vec::new(),
            emitted: HashMap::new(),
            in_progress: HashSet::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns the descriptor registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the descriptor for `ty`, creating it if needed.
    pub fn obtain(&mut self, ty: TypeId) -> DescriptorId {
        self.registry.obtain(self.provider, ty)
    }

    /// Returns the descriptor for `ty` if one exists.
    #[must_use]
    pub fn quick_retrieve(&self, ty: TypeId) -> Option<DescriptorId> {
        self.registry.quick_retrieve(ty)
    }

    /// Qualified name of `ty`.
    pub fn clr_name(&mut self, ty: TypeId) -> String {
        let id = self.obtain(ty);
        self.registry.clr_name(self.provider, id).to_string()
    }

    /// Script name of `ty`.
    pub fn script_name(&mut self, ty: TypeId) -> String {
        let id = self.obtain(ty);
        self.registry.script_name(self.provider, id)
    }

    /// Default table path of `ty`.
    pub fn default_table(&mut self, ty: TypeId) -> Vec<String> {
        let id = self.obtain(ty);
        self.registry
            .default_table(self.provider, id, self.config.get_root_namespace())
            .to_vec()
    }

    /// Records base pairs for `ty` and everything it is structurally built from.
    pub fn collect_to_global(&mut self, ty: TypeId) {
        let id = self.obtain(ty);
        self.registry.collect_to_global(self.provider, id);
    }

    /// Returns true if a document for `ty` exists.
    #[must_use]
    pub fn is_emitted(&self, ty: TypeId) -> bool {
        self.emitted.contains_key(&ty)
    }

    /// Generates the document of `ty` under its default table path.
    ///
    /// Returns false if the type was already emitted or is being generated.
    pub fn generate(&mut self, ty: TypeId) -> bool {
        self.generate_inner(ty, None)
    }

    /// Generates the document of `ty` under an explicit table path.
    pub fn generate_with_table<S: AsRef<str>>(&mut self, ty: TypeId, table: &[S]) -> bool {
        self.generate_inner(ty, Some(names::global_table(table)))
    }

    fn generate_inner(&mut self, ty: TypeId, table: Option<String>) -> bool {
        let provider = self.provider;

        if self.emitted.contains_key(&ty) {
            debug!(ty = %ty, "document already emitted");
            return false;
        }
        if !self.in_progress.insert(ty) {
            debug!(ty = %ty, "document generation already in progress");
            return false;
        }

        let id = self.registry.obtain(provider, ty);
        let class_name = self.registry.clr_name(provider, id).to_string();
        let table = match table {
            Some(table) => table,
            None => names::global_table(self.registry.default_table(
                provider,
                id,
                self.config.get_root_namespace(),
            )),
        };

        let mut output = String::new();
        output.push_str("---@meta\n");
        output.push_str(&format!("---@class {}", class_name));
        if let Some(base) = provider.base_type(ty) {
            let base = self.registry.obtain(provider, base);
            output.push_str(&format!(" : {}", self.registry.clr_name(provider, base)));
        }
        output.push('\n');

        let mut ctx = EmitContext::new(provider, &mut self.registry, &self.config);
        output.push_str(&FieldGenerator::new(provider.fields(ty)).generate(&mut ctx));
        output.push_str(&PropertyGenerator::new(provider.properties(ty)).generate(&mut ctx));
        output.push_str(&format!("{} = {{}}\n\n", table));
        output.push_str(
            &MethodGenerator::new(provider.methods(ty), &class_name, &table).generate(&mut ctx),
        );
        output.push_str(
            &ConstructorGenerator::new(provider.constructors(ty), &class_name, &table)
                .generate(&mut ctx),
        );

        self.in_progress.remove(&ty);
        self.emitted.insert(ty, self.documents.len());
        debug!(ty = %ty, class = %class_name, bytes = output.len(), "generated document");
        self.documents.push(Document::new(ty, class_name, output));
        true
    }

    /// Generates every root, then every plain or delegate type discovered
    /// through inheritance edges and member types, until nothing new appears.
    ///
    /// Returns the number of documents produced.
    pub fn generate_reachable(&mut self, roots: &[TypeId]) -> usize {
        let provider = self.provider;
        let mut produced = 0;

        for &root in roots {
            self.collect_to_global(root);
            if self.generate(root) {
                produced += 1;
            }
        }

        let mut cursor = 0;
        while let Some(&(derived, _)) = self.registry.base_pairs().get(cursor) {
            cursor += 1;
            let descriptor = self.registry.descriptor(derived);
            if !descriptor.shape().is_documentable() {
                continue;
            }
            let ty = descriptor.original_type();
            if provider.name(ty).ends_with('&') {
                continue;
            }
            if self.generate(ty) {
                produced += 1;
            }
        }

        debug!(roots = roots.len(), produced, "reachable generation finished");
        produced
    }

    /// Returns the document of `ty`, if generated.
    #[must_use]
    pub fn document(&self, ty: TypeId) -> Option<&Document> {
        self.emitted.get(&ty).map(|&index| &self.documents[index])
    }

    /// Documents in emission order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Consumes the session, returning its documents in emission order.
    #[must_use]
    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    /// Writes every document to `sink`, returning how many were written.
    ///
    /// # Errors
    /// Returns the first error reported by the sink.
    pub fn write_to(&self, sink: &mut dyn DocumentSink) -> Result<usize, CodegenError> {
        for document in &self.documents {
            sink.write_document(document)?;
        }
        Ok(self.documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemorySink;
    use luameta_schema::{
        Accessor, ConstructorDef, FieldDef, MethodDef, ParamDef, PropertyDef, TypeCatalog,
        TypeDef, Visibility,
    };

    struct Game {
        catalog: TypeCatalog,
        entity: TypeId,
        item: TypeId,
        object: TypeId,
        callback: TypeId,
    }

    fn game() -> Game {
        let mut catalog = TypeCatalog::new();
        let object = catalog.add_type("object", TypeDef::new("Object").in_namespace("System"));
        let delegate = catalog.add_type(
            "delegate",
            TypeDef::new("Delegate").in_namespace("System").extends(object),
        );
        let int = catalog.add_type("int", TypeDef::new("Int32").in_namespace("System"));
        let float = catalog.add_type("float", TypeDef::new("Single").in_namespace("System"));
        let string = catalog.add_type("string", TypeDef::new("String").in_namespace("System"));
        let nullable =
            catalog.add_type("nullable", TypeDef::new("Nullable`1").in_namespace("System"));
        let float_opt = catalog.add_type(
            "float?",
            TypeDef::new("Nullable`1")
                .in_namespace("System")
                .generic(nullable, vec![float]),
        );
        let callback = catalog.add_type(
            "Callback",
            TypeDef::new("Callback")
                .in_namespace("Barotrauma")
                .extends(delegate)
                .with_method(MethodDef::new("Invoke").param(ParamDef::new("value", int))),
        );
        let entity = catalog.add_type(
            "Entity",
            TypeDef::new("Entity")
                .in_namespace("Barotrauma")
                .extends(object)
                .with_field(FieldDef::new("ID", int)),
        );
        let item = catalog.add_type(
            "Item",
            TypeDef::new("Item")
                .in_namespace("Barotrauma.Items")
                .extends(entity)
                .with_field(FieldDef::new("Condition", float_opt))
                .with_field(
                    FieldDef::new("<Name>k__BackingField", string)
                        .with_visibility(Visibility::Private),
                )
                .with_property(
                    PropertyDef::new("Name", string)
                        .with_getter(Accessor::new(Visibility::Public))
                        .with_setter(Accessor::new(Visibility::Private)),
                )
                .with_method(
                    MethodDef::new("Use")
                        .with_visibility(Visibility::Family)
                        .as_virtual()
                        .returns(int)
                        .param(ParamDef::new("deltaTime", float).optional()),
                )
                .with_method(MethodDef::new("Hook").param(ParamDef::new("cb", callback)))
                .with_constructor(ConstructorDef::new().param(ParamDef::new("id", int))),
        );
        Game {
            catalog,
            entity,
            item,
            object,
            callback,
        }
    }

    #[test]
    fn test_generate_full_document() {
        let game = game();
        let mut session = Session::new(&game.catalog);
        assert!(session.generate(game.item));

        let document = session.document(game.item).expect("document exists");
        assert_eq!(document.clr_name, "Barotrauma.Items.Item");
        assert_eq!(
            document.text,
            "---@meta\n\
             ---@class Barotrauma.Items.Item : Barotrauma.Entity\n\
             ---`Field Public Instance`\n\
             ---@field Condition System.Single\n\
             ---`Getter Public Instance`\n\
             ---<br/>`Setter Private Instance`\n\
             ---@field Name System.String\n\
             _G['Item'] = {}\n\
             \n\
             ---`Method NonPublic Instance Virtual`\n\
             ---@param deltaTime? System.Single\n\
             ---@return System.Int32\n\
             _G['Item'].Use = function(deltaTime) end\n\
             \n\
             ---`Constructor Public Instance`\n\
             ---@param id System.Int32\n\
             ---@return Barotrauma.Items.Item\n\
             _G['Item'] = function(id) end\n\
             \n\
             ---`Constructor Public Instance`\n\
             ---@param id System.Int32\n\
             ---@return Barotrauma.Items.Item\n\
             _G['Item'].__new = function(id) end\n\
             \n"
        );
    }

    #[test]
    fn test_generate_is_deduplicated() {
        let game = game();
        let mut session = Session::new(&game.catalog);

        assert!(session.generate(game.item));
        assert!(!session.generate(game.item));
        assert_eq!(session.documents().len(), 1);
        assert!(session.is_emitted(game.item));
    }

    #[test]
    fn test_generate_with_table_override() {
        let game = game();
        let mut session = Session::new(&game.catalog);
        assert!(session.generate_with_table(game.entity, &["Game", "Entity"]));

        let text = &session.document(game.entity).expect("document").text;
        assert!(text.contains("_G['Game']['Entity'] = {}\n"));
        assert!(text.starts_with("---@meta\n---@class Barotrauma.Entity : System.Object\n"));
    }

    #[test]
    fn test_class_without_base() {
        let game = game();
        let mut session = Session::new(&game.catalog);
        session.generate(game.object);

        let text = &session.document(game.object).expect("document").text;
        assert_eq!(text, "---@meta\n---@class System.Object\n_G['System']['Object'] = {}\n\n");
    }

    #[test]
    fn test_root_namespace_config() {
        let game = game();
        let config = GeneratorConfig::new().root_namespace("System");
        let mut session = Session::with_config(&game.catalog, config);

        assert_eq!(session.default_table(game.object), ["Object"]);
        assert_eq!(session.default_table(game.item), ["Barotrauma", "Items", "Item"]);
    }

    #[test]
    fn test_generate_reachable() {
        let game = game();
        let mut session = Session::new(&game.catalog);
        let produced = session.generate_reachable(&[game.item]);

        assert_eq!(produced, session.documents().len());
        assert!(session.is_emitted(game.entity));
        assert!(session.is_emitted(game.object));
        let float = game.catalog.type_by_key("float").expect("float");
        assert!(session.is_emitted(float));
        // The nullable wrapper itself is never documented.
        let float_opt = game.catalog.type_by_key("float?").expect("float?");
        assert!(!session.is_emitted(float_opt));
        // Public methods are not bound, so their parameter types stay undiscovered.
        assert!(!session.is_emitted(game.callback));
        assert_eq!(session.generate_reachable(&[game.item]), 0);
    }

    #[test]
    fn test_names_are_deterministic() {
        let game = game();
        let mut session = Session::new(&game.catalog);
        let float_opt = game.catalog.type_by_key("float?").expect("float?");

        let first = session.script_name(float_opt);
        let size = session.registry().len();
        assert_eq!(session.script_name(float_opt), first);
        assert_eq!(session.registry().len(), size);
        assert_eq!(first, "System.Single");
        assert_eq!(session.clr_name(game.callback), "Barotrauma.Callback");
    }

    #[test]
    fn test_type_in_progress_is_not_regenerated() {
        let game = game();
        let mut session = Session::new(&game.catalog);
        session.in_progress.insert(game.item);

        assert!(!session.generate(game.item));
        assert!(session.document(game.item).is_none());

        session.in_progress.remove(&game.item);
        assert!(session.generate(game.item));
        assert!(session.in_progress.is_empty());
        assert_eq!(session.documents().len(), 1);
    }

    #[test]
    fn test_write_to_sink() {
        let game = game();
        let mut session = Session::new(&game.catalog);
        session.generate(game.entity);
        session.generate(game.item);

        let mut sink = MemorySink::new();
        assert_eq!(session.write_to(&mut sink).expect("write"), 2);
        assert_eq!(sink.documents()[0].type_id, game.entity);
        assert_eq!(sink.documents(), session.documents());
    }
}
