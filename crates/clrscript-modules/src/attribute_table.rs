//! Per-node host attribute tables.
//!
//! Every namespace module delegates externally visible attribute storage to
//! an [`AttributeTable`] supplied by the host (in a dynamic-language
//! embedding, the module object's own attribute dictionary). The engine
//! consults the table so
//! that externally pre-set attributes are never silently overwritten by lazy
//! resolution, and writes through it before touching its own cache.

use clrscript_core::TableWriteError;
use rustc_hash::FxHashMap;

use crate::ModuleEntry;

/// The host's own attribute store for one namespace module.
pub trait AttributeTable {
    /// Look up an externally visible attribute.
    fn try_get(&self, name: &str) -> Option<ModuleEntry>;

    /// Write an attribute. A failed write aborts the store that requested
    /// it; the engine's cache is only updated after success.
    fn set(&mut self, name: &str, entry: ModuleEntry) -> Result<(), TableWriteError>;
}

/// In-memory attribute table; the default when the host installs nothing.
#[derive(Default)]
pub struct DictTable {
    entries: FxHashMap<String, ModuleEntry>,
}

impl DictTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AttributeTable for DictTable {
    fn try_get(&self, name: &str) -> Option<ModuleEntry> {
        self.entries.get(name).cloned()
    }

    fn set(&mut self, name: &str, entry: ModuleEntry) -> Result<(), TableWriteError> {
        self.entries.insert(name.to_string(), entry);
        Ok(())
    }
}
