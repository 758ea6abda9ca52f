//! Collaborator contracts at the reflection boundary.
//!
//! The namespace engine never touches the reflection API directly; it talks
//! to these traits. [`AssemblyManager`] answers namespace and type queries
//! and performs the assembly-loading side effects, [`TypeBinder`] turns a
//! reflected handle into the one reusable wrapper for that type, and
//! [`ImportHooks`] receives namespace-discovery notifications for the host's
//! import machinery.
//!
//! # Thread Safety
//!
//! None of these contracts are called concurrently. The surrounding host
//! environment serializes entry into the engine (an interpreter-lock style
//! discipline), and assembly loading in particular must never run
//! concurrently with itself: the engine snapshots and diffs the global
//! namespace set around each load.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use crate::{
    AssemblyDescriptor, AssemblyHandle, AssemblyName, BoundType, QualifiedName, TypeHandle,
};

/// Reflection queries and assembly-loading side effects.
///
/// The engine treats lookups as cheap and repeatable; none of the query
/// methods may mutate observable state. The `load_*` strategies each return
/// `None` on a miss so the caller can fall through to the next strategy.
/// Iteration order of [`public_types`](Self::public_types) is
/// implementation-defined and may vary across assembly load orders; the
/// engine deterministically takes the first element.
pub trait AssemblyManager {
    /// Is `qualified` a namespace known from any loaded assembly?
    fn is_valid_namespace(&self, qualified: &QualifiedName) -> bool;

    /// All public types whose qualified name is exactly `qualified`.
    ///
    /// More than one entry is legal (partial or forwarded types); the first
    /// wins silently.
    fn public_types(&self, qualified: &QualifiedName) -> Vec<TypeHandle>;

    /// Short names of every currently-known direct child (sub-namespace or
    /// type) of `qualified`.
    fn direct_child_names(&self, qualified: &QualifiedName) -> Vec<String>;

    /// Demangled generic base name for a short name requested under a
    /// namespace ("List" under "System.Collections.Generic" → "List`1"),
    /// or `None` when no generic matches.
    fn demangle_generic(&self, namespace: &QualifiedName, short_name: &str) -> Option<String>;

    /// Descriptors of the assemblies that contributed types to `namespace`.
    fn assemblies_for(&self, namespace: &QualifiedName) -> Vec<AssemblyDescriptor>;

    /// The full set of currently-known namespaces, for pre/post load diffing.
    fn loaded_namespaces(&self) -> FxHashSet<String>;

    /// Every currently loaded assembly, in load order.
    fn loaded_assemblies(&self) -> Vec<AssemblyDescriptor>;

    /// Find an already-loaded assembly matching `ident`.
    fn find_loaded(&self, ident: &str) -> Option<AssemblyHandle>;

    /// Load an assembly from a filesystem path. `None` on a miss.
    fn load_file(&mut self, path: &str) -> Option<AssemblyHandle>;

    /// Load an assembly by structured name. `None` on a miss.
    fn load_by_name(&mut self, name: &AssemblyName) -> Option<AssemblyHandle>;

    /// Load an assembly from an absolute full path. `None` on a miss.
    fn load_full_path(&mut self, path: &str) -> Option<AssemblyHandle>;

    /// Re-scan loaded assemblies for namespaces after a successful load.
    fn rescan(&mut self);
}

/// Produces the one reusable wrapper for a reflected type.
///
/// Implementations memoize by type identity, so repeated binds of the same
/// type return the same `Rc`.
pub trait TypeBinder {
    /// Bind a reflected handle to its host-visible wrapper.
    fn bind(&mut self, handle: &TypeHandle) -> Rc<BoundType>;
}

/// Import-machinery integration.
pub trait ImportHooks {
    /// A namespace became resolvable for the first time; make it
    /// independently importable on the host side.
    fn notify_namespace_discovered(&mut self, qualified: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    // The traits are object-safe contracts; assert that here so a signature
    // change that breaks `Box<dyn …>` usage fails fast.
    #[test]
    fn contracts_are_object_safe() {
        fn _assembly(_: &dyn AssemblyManager) {}
        fn _binder(_: &dyn TypeBinder) {}
        fn _hooks(_: &dyn ImportHooks) {}
    }
}
