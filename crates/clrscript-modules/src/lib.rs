//! The namespace module engine.
//!
//! This crate implements the navigable module graph over a foreign
//! managed-runtime type system: [`NamespaceModule`] (one lazily populated
//! namespace level), [`RootModule`] (the unnamed top level with assembly
//! bootstrap and import integration), the unified [`ModuleEntry`] cache
//! entry, per-node host [`AttributeTable`]s, and the statically declared
//! module [`ExportTable`].
//!
//! Identity types and collaborator contracts live in `clrscript-core`.

mod attribute_table;
mod context;
mod entry;
mod exports;
mod namespace_module;
mod root_module;

#[cfg(test)]
mod testutil;

pub use attribute_table::{AttributeTable, DictTable};
pub use context::{HostContext, TableFactory};
pub use entry::ModuleEntry;
pub use exports::{
    ExportKind, ExportProvider, ExportTable, ModuleExport, ModuleFunction, ModuleProperty,
    ROOT_PROVIDER,
};
pub use namespace_module::NamespaceModule;
pub use root_module::{RESERVED_ATTRIBUTES, RootModule, SetAttrOutcome};
