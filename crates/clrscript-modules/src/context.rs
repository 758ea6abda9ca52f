//! Host composition root.
//!
//! [`HostContext`] bundles the collaborator objects every engine operation
//! needs — the assembly manager, the type binder, the import hooks — together
//! with the process-wide [`BridgeOptions`]. The engine borrows the context
//! per call and owns none of it, so the embedding host stays in charge of
//! collaborator lifetimes.

use clrscript_core::{AssemblyManager, BridgeOptions, ImportHooks, QualifiedName, TypeBinder};

use crate::attribute_table::{AttributeTable, DictTable};

/// Factory producing the host attribute table for a newly materialized
/// namespace module.
pub type TableFactory = Box<dyn Fn(&QualifiedName) -> Box<dyn AttributeTable>>;

/// Collaborators and configuration for one embedding.
pub struct HostContext {
    /// Reflection queries and assembly loading.
    pub assemblies: Box<dyn AssemblyManager>,
    /// Type handle → reusable wrapper.
    pub binder: Box<dyn TypeBinder>,
    /// Import-machinery notifications.
    pub hooks: Box<dyn ImportHooks>,
    /// Process-wide toggles.
    pub options: BridgeOptions,
    table_factory: TableFactory,
}

impl HostContext {
    /// Create a context with default options and in-memory attribute tables.
    pub fn new(
        assemblies: Box<dyn AssemblyManager>,
        binder: Box<dyn TypeBinder>,
        hooks: Box<dyn ImportHooks>,
    ) -> Self {
        Self {
            assemblies,
            binder,
            hooks,
            options: BridgeOptions::default(),
            table_factory: Box::new(|_| Box::new(DictTable::new())),
        }
    }

    /// Install a custom attribute-table factory (e.g. one backed by the
    /// host object model's own per-module dictionaries).
    pub fn with_table_factory(mut self, factory: TableFactory) -> Self {
        self.table_factory = factory;
        self
    }

    /// Produce the attribute table for a namespace about to materialize.
    pub fn new_table(&self, qualified: &QualifiedName) -> Box<dyn AttributeTable> {
        (self.table_factory)(qualified)
    }
}
