//! Finished modules and the collection of modules parsed so far.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::Definition;

/// The result of parsing one source file.
///
/// `definitions` keeps source order; `symbol_table` maps each top-level
/// name (including import aliases) to its index in `definitions`.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub name: String,
    pub filename: String,
    definitions: Vec<Arc<Definition>>,
    symbol_table: FxHashMap<String, usize>,
}

impl Module {
    pub fn new(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            filename: filename.into(),
            definitions: Vec::new(),
            symbol_table: FxHashMap::default(),
        }
    }

    /// Add a definition under `key`.
    ///
    /// Returns the definition back if `key` is already taken.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        definition: Arc<Definition>,
    ) -> Result<(), Arc<Definition>> {
        let key = key.into();
        if self.symbol_table.contains_key(&key) {
            return Err(definition);
        }
        self.symbol_table.insert(key, self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    /// Look a top-level name up.
    pub fn get(&self, name: &str) -> Option<&Arc<Definition>> {
        self.symbol_table
            .get(name)
            .map(|&index| &self.definitions[index])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.symbol_table.contains_key(name)
    }

    /// Every definition in source order.
    pub fn definitions(&self) -> &[Arc<Definition>] {
        &self.definitions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.filename == other.filename
            && self.definitions == other.definitions
    }
}

impl Eq for Module {}

/// Modules keyed by name, iterated in insertion order.
#[derive(Clone, Debug, Default)]
pub struct ModuleMap {
    modules: Vec<Module>,
    index: FxHashMap<String, usize>,
}

impl ModuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module.
    ///
    /// Returns the module back if one with the same name already exists.
    #[allow(clippy::result_large_err)]
    pub fn insert(&mut self, module: Module) -> Result<(), Module> {
        if self.index.contains_key(&module.name) {
            return Err(module);
        }
        self.index.insert(module.name.clone(), self.modules.len());
        self.modules.push(module);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.index.get(name).map(|&index| &self.modules[index])
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Module> {
        self.modules.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<'a> IntoIterator for &'a ModuleMap {
    type Item = &'a Module;
    type IntoIter = std::slice::Iter<'a, Module>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
