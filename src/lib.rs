//! clrscript — a foreign managed-runtime type system exposed to a host
//! scripting environment as a navigable module graph.
//!
//! Dotted names traverse the graph exactly like nested modules:
//! `System.Collections.Generic` materializes one `NamespaceModule` per
//! level, on demand, backed by whatever reflection side the host plugs in
//! through the `AssemblyManager` contract.
//!
//! See `clrscript-core` for the identity types and collaborator traits and
//! `clrscript-modules` for the engine itself; this crate re-exports both.

pub use clrscript_core as core;
pub use clrscript_modules as modules;

pub mod prelude {
    pub use clrscript_core::{
        AssemblyDescriptor, AssemblyHandle, AssemblyManager, AssemblyName, AssemblyVersion,
        BoundType, BridgeOptions, ClrScriptError, ImportHooks, QualifiedName, RegistrationError,
        ResolveError, TableWriteError, TypeAttributes, TypeBinder, TypeHandle, TypeHash,
    };
    pub use clrscript_modules::{
        AttributeTable, DictTable, ExportKind, ExportProvider, ExportTable, HostContext,
        ModuleEntry, ModuleExport, ModuleFunction, ModuleProperty, NamespaceModule,
        RESERVED_ATTRIBUTES, ROOT_PROVIDER, RootModule, SetAttrOutcome,
    };
}
