//! Statically declared module export table.
//!
//! Module-level operations on the root module (loading assemblies, listing
//! them, the preload toggle) are declared up front as [`ModuleExport`]
//! descriptors grouped into [`ExportProvider`]s, and the table is built once
//! at startup by walking the declared provider list. A provider may name a
//! base provider; the builder walks the declared base chain so inherited
//! members stay discoverable, with derived declarations shadowing base ones.
//! There is no runtime attribute introspection anywhere.
//!
//! How an export is *invoked* is the marshaling layer's business; the table
//! only carries names, kinds, and documentation.

use std::rc::Rc;

use clrscript_core::{RegistrationError, TypeHash};
use rustc_hash::FxHashMap;

use crate::ModuleEntry;

/// Kind of a declared module export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Callable module function.
    Function,
    /// Readable/writable module property.
    Property,
}

/// One declared module-level export.
#[derive(Debug, Clone, Copy)]
pub struct ModuleExport {
    /// Attribute name the export is stored under.
    pub name: &'static str,
    /// Function or property.
    pub kind: ExportKind,
    /// Documentation string surfaced to the host environment.
    pub doc: &'static str,
}

/// A provider type's declared exports, with an optional base provider.
#[derive(Debug, Clone, Copy)]
pub struct ExportProvider {
    /// Diagnostic name of the providing type.
    pub type_name: &'static str,
    /// Exports declared directly on this provider.
    pub exports: &'static [ModuleExport],
    /// Declared base provider whose exports are inherited.
    pub base: Option<&'static ExportProvider>,
}

/// Module-level callable wrapper.
///
/// Invocation and argument marshaling live outside this crate; the wrapper
/// is the stable identity the host environment calls through.
#[derive(Debug)]
pub struct ModuleFunction {
    name: String,
    doc: String,
    hash: TypeHash,
}

impl ModuleFunction {
    /// Create a function wrapper.
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        let name = name.into();
        let hash = TypeHash::from_member(&name);
        Self {
            name,
            doc: doc.into(),
            hash,
        }
    }

    /// The export name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The documentation string.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// Identity hash in the member domain.
    pub fn member_hash(&self) -> TypeHash {
        self.hash
    }
}

/// Module-level property wrapper.
#[derive(Debug)]
pub struct ModuleProperty {
    name: String,
    doc: String,
}

impl ModuleProperty {
    /// Create a property wrapper.
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
        }
    }

    /// The export name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The documentation string.
    pub fn doc(&self) -> &str {
        &self.doc
    }
}

/// The built name → entry table.
///
/// Iteration preserves declaration order: providers in the order given,
/// each provider's own exports before its base chain's.
pub struct ExportTable {
    order: Vec<String>,
    entries: FxHashMap<String, ModuleEntry>,
}

impl ExportTable {
    /// Build the table from a declared provider list.
    ///
    /// Walks each provider and then its base chain. A name declared by a
    /// derived provider shadows the same name from its base; a name declared
    /// twice by the *same* provider is an error. Across unrelated providers
    /// the first declaration wins.
    pub fn build(providers: &[&ExportProvider]) -> Result<Self, RegistrationError> {
        let mut table = Self {
            order: Vec::new(),
            entries: FxHashMap::default(),
        };

        for provider in providers {
            let mut current = Some(*provider);
            while let Some(p) = current {
                let mut declared_here: Vec<&str> = Vec::new();
                for export in p.exports {
                    if declared_here.contains(&export.name) {
                        return Err(RegistrationError::DuplicateExport {
                            name: export.name.to_string(),
                            provider: p.type_name.to_string(),
                        });
                    }
                    declared_here.push(export.name);
                    table.insert_first(export);
                }
                current = p.base;
            }
        }
        Ok(table)
    }

    fn insert_first(&mut self, export: &ModuleExport) {
        if self.entries.contains_key(export.name) {
            return;
        }
        let entry = match export.kind {
            ExportKind::Function => {
                ModuleEntry::Function(Rc::new(ModuleFunction::new(export.name, export.doc)))
            }
            ExportKind::Property => {
                ModuleEntry::Property(Rc::new(ModuleProperty::new(export.name, export.doc)))
            }
        };
        self.order.push(export.name.to_string());
        self.entries.insert(export.name.to_string(), entry);
    }

    /// Look up an export by name.
    pub fn get(&self, name: &str) -> Option<&ModuleEntry> {
        self.entries.get(name)
    }

    /// Iterate `(name, entry)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleEntry)> {
        self.order
            .iter()
            .map(|name| (name.as_str(), &self.entries[name]))
    }

    /// Number of registered exports.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Exports declared on the root module itself.
pub static ROOT_PROVIDER: ExportProvider = ExportProvider {
    type_name: "RootModule",
    exports: &[
        ModuleExport {
            name: "AddReference",
            kind: ExportKind::Function,
            doc: "Load an assembly by name or path and make its namespaces importable.",
        },
        ModuleExport {
            name: "ListAssemblies",
            kind: ExportKind::Function,
            doc: "List loaded assemblies; verbose listing includes version, culture and token.",
        },
        ModuleExport {
            name: "FindAssembly",
            kind: ExportKind::Function,
            doc: "Find an already-loaded assembly by short name.",
        },
        ModuleExport {
            name: "preload",
            kind: ExportKind::Property,
            doc: "Whether namespaces are eagerly populated when imported.",
        },
    ],
    base: None,
};
