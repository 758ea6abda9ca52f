//! The unnamed top-level module.
//!
//! [`RootModule`] wraps the root [`NamespaceModule`] (the empty qualified
//! name) and adds the host-bootstrap operations: loading assemblies and
//! propagating newly discovered namespaces to the import machinery, listing
//! loaded assemblies, the controlled entry point the import system uses to
//! materialize a dotted name, and the settable-attribute policy for the
//! root module object.
//!
//! Assembly loading is the only way the universe of resolvable namespaces
//! grows at runtime. Modules materialized before a load are never recreated;
//! their next `resolve`/`preload` simply sees the larger universe.

use std::rc::Rc;

use clrscript_core::{AssemblyHandle, AssemblyName, ClrScriptError, QualifiedName, ResolveError};
use tracing::debug;

use crate::ModuleEntry;
use crate::context::HostContext;
use crate::exports::{ExportProvider, ExportTable, ROOT_PROVIDER};
use crate::namespace_module::NamespaceModule;

/// Attribute names the import protocol may set on the root module object
/// after construction. Everything else that is not namespace-valued goes
/// through the host's default attribute-write path.
pub const RESERVED_ATTRIBUTES: [&str; 6] = [
    "__spec__",
    "__file__",
    "__name__",
    "__path__",
    "__loader__",
    "__package__",
];

/// Where a root-module attribute write ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetAttrOutcome {
    /// Accepted and stored by the namespace machinery.
    Stored,
    /// Not ours; route through the host object model's default write path.
    Delegated,
}

/// The root of the namespace tree, plus bootstrap operations.
pub struct RootModule {
    inner: Rc<NamespaceModule>,
    exports: ExportTable,
}

impl RootModule {
    /// Create the root module and install the declared module exports.
    pub fn new(
        host: &mut HostContext,
        providers: &[&ExportProvider],
    ) -> Result<Self, ClrScriptError> {
        let table = host.new_table(&QualifiedName::root());
        let inner = NamespaceModule::root(table);
        let exports = ExportTable::build(providers)?;
        for (name, entry) in exports.iter() {
            inner.store(name, entry.clone())?;
        }
        Ok(Self { inner, exports })
    }

    /// Create the root module with the standard export set.
    pub fn with_default_exports(host: &mut HostContext) -> Result<Self, ClrScriptError> {
        Self::new(host, &[&ROOT_PROVIDER])
    }

    /// The underlying namespace module; this is the stable identity the
    /// host's attribute-access protocol delegates to.
    pub fn module(&self) -> &Rc<NamespaceModule> {
        &self.inner
    }

    /// The installed module export table.
    pub fn exports(&self) -> &ExportTable {
        &self.exports
    }

    /// Resolve a top-level name (an assembly-root namespace or global type).
    pub fn resolve(
        &self,
        name: &str,
        allow_generic: bool,
        host: &mut HostContext,
    ) -> Result<Option<ModuleEntry>, ResolveError> {
        self.inner.resolve(name, allow_generic, host)
    }

    /// Preload every currently-discoverable top-level name.
    pub fn preload(&self, host: &mut HostContext) -> Result<(), ResolveError> {
        self.inner.preload(host)
    }

    /// Load (or locate) an assembly and make its namespaces importable.
    ///
    /// Strategies run in strict order, stopping at the first success:
    /// an already-loaded assembly matching `ident`, a filesystem path, a
    /// structured assembly name, an absolute full path. On success the
    /// namespace universe is re-scanned and every namespace that did not
    /// exist before the attempt is reported, exactly once and in sorted
    /// order, to the import hooks.
    ///
    /// Must not run concurrently with itself: the pre/post namespace
    /// snapshots diff global state.
    pub fn load_assembly(
        &self,
        ident: &str,
        host: &mut HostContext,
    ) -> Result<AssemblyHandle, ResolveError> {
        let before = host.assemblies.loaded_namespaces();

        let handle = self
            .try_load(ident, host)
            .ok_or_else(|| ResolveError::AssemblyNotFound {
                ident: ident.to_string(),
            })?;

        host.assemblies.rescan();
        let after = host.assemblies.loaded_namespaces();

        let mut fresh: Vec<&String> = after.difference(&before).collect();
        fresh.sort();
        for namespace in fresh {
            debug!(namespace = %namespace, "namespace discovered");
            host.hooks.notify_namespace_discovered(namespace);
        }

        Ok(handle)
    }

    fn try_load(&self, ident: &str, host: &mut HostContext) -> Option<AssemblyHandle> {
        if let Some(handle) = host.assemblies.find_loaded(ident) {
            debug!(ident, strategy = "already-loaded", "assembly located");
            return Some(handle);
        }
        if let Some(handle) = host.assemblies.load_file(ident) {
            debug!(ident, strategy = "file", "assembly loaded");
            return Some(handle);
        }
        if let Some(name) = AssemblyName::parse(ident) {
            if let Some(handle) = host.assemblies.load_by_name(&name) {
                debug!(ident, strategy = "by-name", "assembly loaded");
                return Some(handle);
            }
        }
        let handle = host.assemblies.load_full_path(ident);
        if handle.is_some() {
            debug!(ident, strategy = "full-path", "assembly loaded");
        }
        handle
    }

    /// Short or fully qualified names of the loaded assemblies, in load
    /// order. A pure projection; never cached.
    pub fn list_assemblies(&self, verbose: bool, host: &HostContext) -> Vec<String> {
        host.assemblies
            .loaded_assemblies()
            .iter()
            .map(|descriptor| {
                if verbose {
                    descriptor.full_name()
                } else {
                    descriptor.short_name().to_string()
                }
            })
            .collect()
    }

    /// Import-machinery entry point: materialize a dotted name.
    ///
    /// Every intermediate namespace along the path is materialized if not
    /// already present. Generic-name guessing applies only to the final
    /// segment. A missing segment, or a non-namespace in the middle of the
    /// path, yields `Ok(None)` — the host's ordinary "no such module".
    pub fn import_module(
        &self,
        dotted: &str,
        host: &mut HostContext,
    ) -> Result<Option<ModuleEntry>, ResolveError> {
        let name = QualifiedName::new(dotted)?;
        let segments: Vec<&str> = name.segments().collect();

        let mut current = Rc::clone(&self.inner);
        for (index, segment) in segments.iter().enumerate() {
            let is_last = index + 1 == segments.len();
            let Some(entry) = current.resolve(segment, is_last, host)? else {
                return Ok(None);
            };

            if is_last {
                if host.options.preload {
                    if let Some(namespace) = entry.as_namespace() {
                        namespace.preload(host)?;
                    }
                }
                return Ok(Some(entry));
            }

            match entry.as_namespace() {
                Some(namespace) => current = Rc::clone(namespace),
                None => return Ok(None),
            }
        }
        Ok(None)
    }

    /// Attribute-write policy for the root module object.
    ///
    /// The reserved import-protocol names are written through the host
    /// attribute table without becoming resolvable children; namespace
    /// values are stored as children; anything else is delegated to the
    /// host object model's default write path.
    pub fn set_attr(
        &self,
        name: &str,
        entry: ModuleEntry,
    ) -> Result<SetAttrOutcome, ResolveError> {
        if RESERVED_ATTRIBUTES.contains(&name) {
            self.inner.write_attribute(name, entry)?;
            return Ok(SetAttrOutcome::Stored);
        }
        if entry.is_namespace() {
            self.inner.store(name, entry)?;
            return Ok(SetAttrOutcome::Stored);
        }
        Ok(SetAttrOutcome::Delegated)
    }
}
