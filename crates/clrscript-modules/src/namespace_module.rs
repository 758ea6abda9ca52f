//! One level of the foreign namespace hierarchy.
//!
//! A [`NamespaceModule`] stands in for a namespace ("System.Collections")
//! the way a nested module would: attribute lookup resolves children on
//! demand, caches them, and never resolves the same name twice. Children are
//! created only when the reflection side confirms they exist — the tree
//! grows lazily under attribute traffic and assembly loads, never eagerly
//! for the whole type universe.
//!
//! # Caching discipline
//!
//! The cache is append-only per key: once a name is bound, the binding is
//! stable for the module's lifetime and every later lookup returns the
//! identical entry. Failed lookups are *not* cached — a name missing today
//! may resolve after the next assembly load. `exported_names` is likewise
//! append-only, built lazily by [`preload`](NamespaceModule::preload).
//!
//! # Thread Safety
//!
//! Not thread-safe by design; the embedding host serializes entry into the
//! engine. `Rc`/`RefCell` here document that single-owner discipline in the
//! type system.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use clrscript_core::{AssemblyDescriptor, QualifiedName, ResolveError};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::ModuleEntry;
use crate::attribute_table::AttributeTable;
use crate::context::HostContext;

/// A namespace level exposed to the host as a module-like object.
pub struct NamespaceModule {
    qualified_name: QualifiedName,
    display_name: String,
    cache: RefCell<FxHashMap<String, ModuleEntry>>,
    exported: RefCell<Vec<String>>,
    attributes: RefCell<Box<dyn AttributeTable>>,
}

impl NamespaceModule {
    /// Create a module for a non-root namespace.
    ///
    /// The qualified name must be non-empty; the root is constructed only
    /// through [`RootModule`](crate::RootModule).
    pub fn new(
        qualified_name: QualifiedName,
        attributes: Box<dyn AttributeTable>,
    ) -> Result<Rc<Self>, ResolveError> {
        if qualified_name.is_root() {
            return Err(ResolveError::EmptyName);
        }
        let display_name = qualified_name.simple_name().to_string();
        Ok(Rc::new(Self {
            qualified_name,
            display_name,
            cache: RefCell::new(FxHashMap::default()),
            exported: RefCell::new(Vec::new()),
            attributes: RefCell::new(attributes),
        }))
    }

    /// The unnamed top-level namespace. Only the root module wraps this.
    pub(crate) fn root(attributes: Box<dyn AttributeTable>) -> Rc<Self> {
        Rc::new(Self {
            qualified_name: QualifiedName::root(),
            display_name: "<root>".to_string(),
            cache: RefCell::new(FxHashMap::default()),
            exported: RefCell::new(Vec::new()),
            attributes: RefCell::new(attributes),
        })
    }

    /// The namespace this module represents. Empty for the root.
    pub fn qualified_name(&self) -> &QualifiedName {
        &self.qualified_name
    }

    /// Short diagnostic name; not globally unique.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Check whether a child is already cached.
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.borrow().contains_key(name)
    }

    /// The cached entry for a name, if resolution already bound one.
    pub fn cached(&self, name: &str) -> Option<ModuleEntry> {
        self.cache.borrow().get(name).cloned()
    }

    /// Names confirmed resolvable by [`preload`](Self::preload), in
    /// confirmation order. Every exported name is also cached.
    pub fn exported_names(&self) -> Vec<String> {
        self.exported.borrow().clone()
    }

    /// Everything this module currently knows by name: exported names first,
    /// then any remaining cached names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.exported.borrow().clone();
        let mut extra: Vec<String> = self
            .cache
            .borrow()
            .keys()
            .filter(|k| !names.iter().any(|n| n == *k))
            .cloned()
            .collect();
        extra.sort();
        names.extend(extra);
        names
    }

    /// Resolve one child name.
    ///
    /// Order: cache, namespace (namespaces win over same-named types), first
    /// public type in resolver order, then — when `allow_generic` is set — a
    /// demangled generic base name, resolved without further guessing and
    /// stored under both spellings.
    ///
    /// `Ok(None)` means "no such attribute" and is never cached; only a
    /// failed host attribute-table write is an error.
    pub fn resolve(
        &self,
        name: &str,
        allow_generic: bool,
        host: &mut HostContext,
    ) -> Result<Option<ModuleEntry>, ResolveError> {
        if let Some(hit) = self.cache.borrow().get(name).cloned() {
            trace!(namespace = %self.qualified_name, name, "cache hit");
            return Ok(Some(hit));
        }

        let candidate = self.qualified_name.child(name);

        if host.assemblies.is_valid_namespace(&candidate) {
            trace!(namespace = %candidate, "materializing sub-namespace");
            let table = host.new_table(&candidate);
            let child = NamespaceModule::new(candidate, table)?;
            let entry = ModuleEntry::Namespace(child);
            self.cache
                .borrow_mut()
                .insert(name.to_string(), entry.clone());
            return Ok(Some(entry));
        }

        let mut types = host.assemblies.public_types(&candidate);
        if !types.is_empty() {
            // Multiple matches are legal (partial/forwarded types); the
            // first in resolver order wins silently.
            let first = types.swap_remove(0);
            trace!(type_name = %first.qualified_name, "binding type");
            let bound = host.binder.bind(&first);
            let entry = ModuleEntry::Type(bound);
            self.cache
                .borrow_mut()
                .insert(name.to_string(), entry.clone());
            return Ok(Some(entry));
        }

        if allow_generic {
            if let Some(demangled) = host.assemblies.demangle_generic(&self.qualified_name, name) {
                trace!(short = name, demangled = %demangled, "generic base name demangled");
                if let Some(entry) = self.resolve(&demangled, false, host)? {
                    // Denormalized double-store: the short alias resolves in
                    // one hop from now on, through the host table as well.
                    self.store(name, entry.clone())?;
                    return Ok(Some(entry));
                }
            }
        }

        trace!(namespace = %self.qualified_name, name, "not found");
        Ok(None)
    }

    /// Populate every currently-discoverable direct child.
    ///
    /// Idempotent and repeatable; meant to be called again as assemblies
    /// load. Names already cached, and names the host attribute table
    /// defines on its own, are skipped. `exported_names` only ever grows
    /// and never holds duplicates.
    pub fn preload(&self, host: &mut HostContext) -> Result<(), ResolveError> {
        let child_names = host.assemblies.direct_child_names(&self.qualified_name);
        debug!(namespace = %self.qualified_name, count = child_names.len(), "preload");

        for name in child_names {
            if self.cache.borrow().contains_key(&name) {
                continue;
            }
            if self.attributes.borrow().try_get(&name).is_some() {
                // Externally defined attribute; never overwrite it.
                continue;
            }
            if self.resolve(&name, true, host)?.is_some() {
                let mut exported = self.exported.borrow_mut();
                if !exported.iter().any(|n| n == &name) {
                    exported.push(name);
                }
            }
        }
        Ok(())
    }

    /// Bind a child known out-of-band, bypassing resolution.
    ///
    /// The host attribute table is written first; the cache is only updated
    /// after that write succeeds, so a failed write never leaves the cache
    /// ahead of externally visible state. A name that is already bound stays
    /// bound: the call is a no-op then.
    pub fn store(&self, name: &str, entry: ModuleEntry) -> Result<(), ResolveError> {
        if self.cache.borrow().contains_key(name) {
            return Ok(());
        }
        self.attributes
            .borrow_mut()
            .set(name, entry.clone())
            .map_err(|e| ResolveError::AttributeWrite {
                name: name.to_string(),
                reason: e.reason,
            })?;
        self.cache.borrow_mut().insert(name.to_string(), entry);
        Ok(())
    }

    /// Write an attribute through the host table without binding it as a
    /// resolvable child (import-protocol bookkeeping like `__path__`).
    pub(crate) fn write_attribute(&self, name: &str, entry: ModuleEntry) -> Result<(), ResolveError> {
        self.attributes
            .borrow_mut()
            .set(name, entry)
            .map_err(|e| ResolveError::AttributeWrite {
                name: name.to_string(),
                reason: e.reason,
            })
    }

    /// Look up an attribute in the host table only.
    pub fn attribute(&self, name: &str) -> Option<ModuleEntry> {
        self.attributes.borrow().try_get(name)
    }

    /// Descriptors of the assemblies that contributed types to this
    /// namespace. Always fresh, never cached.
    pub fn assemblies(&self, host: &HostContext) -> Vec<AssemblyDescriptor> {
        host.assemblies.assemblies_for(&self.qualified_name)
    }

    /// Teardown hook for the host's garbage collection of the owning
    /// module wrapper: drop every cached child reference so no bound-type
    /// handle dangles past the wrapper.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
        self.exported.borrow_mut().clear();
    }
}

impl fmt::Debug for NamespaceModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamespaceModule")
            .field("qualified_name", &self.qualified_name)
            .field("cached", &self.cache.borrow().len())
            .field("exported", &self.exported.borrow().len())
            .finish()
    }
}
