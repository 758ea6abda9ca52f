//! Core types and collaborator contracts for the clrscript bridge.
//!
//! This crate holds the identity and descriptor types shared across the
//! workspace — [`QualifiedName`], [`TypeHash`], [`TypeHandle`],
//! [`BoundType`], the assembly identity types — plus the error taxonomy and
//! the traits the namespace engine uses to talk to the embedding host:
//! [`AssemblyManager`], [`TypeBinder`], and [`ImportHooks`].
//!
//! The engine itself (namespace modules, the root module, resolution and
//! preload) lives in `clrscript-modules`.

mod assembly;
mod error;
mod host;
mod options;
mod qualified_name;
mod type_handle;
mod type_hash;

pub use assembly::{AssemblyDescriptor, AssemblyHandle, AssemblyName, AssemblyVersion};
pub use error::{ClrScriptError, RegistrationError, ResolveError, TableWriteError};
pub use host::{AssemblyManager, ImportHooks, TypeBinder};
pub use options::BridgeOptions;
pub use qualified_name::QualifiedName;
pub use type_handle::{BoundType, TypeAttributes, TypeHandle};
pub use type_hash::{TypeHash, hash_domains};
