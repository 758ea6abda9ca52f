//! Shared fakes for engine tests.
//!
//! `FakeClr` simulates the reflection side: a mutable universe of
//! namespaces, public types, generic demangling rules, and stageable
//! assemblies that only become visible once "loaded" through one of the
//! four strategies. State sits behind `Rc<RefCell<…>>` so a test can keep a
//! handle and grow the universe mid-test, the way a real assembly load
//! does.

use std::cell::RefCell;
use std::rc::Rc;

use clrscript_core::{
    AssemblyDescriptor, AssemblyHandle, AssemblyManager, AssemblyName, BoundType, ImportHooks,
    QualifiedName, TableWriteError, TypeBinder, TypeHandle, TypeHash,
};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ModuleEntry;
use crate::attribute_table::AttributeTable;
use crate::context::HostContext;

/// Which load strategy a staged assembly answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategy {
    /// Visible to `find_loaded` without any load call.
    AlreadyLoaded,
    /// Loadable through `load_file`.
    File,
    /// Loadable through `load_by_name`.
    ByName,
    /// Loadable through `load_full_path`.
    FullPath,
}

struct StagedAssembly {
    strategy: LoadStrategy,
    namespaces: Vec<String>,
    types: Vec<(String, String)>, // (qualified, assembly short name)
}

#[derive(Default)]
struct ClrState {
    namespaces: FxHashSet<String>,
    pending_namespaces: Vec<String>,
    types: FxHashMap<String, Vec<TypeHandle>>,
    generics: FxHashMap<(String, String), String>,
    assemblies: Vec<AssemblyDescriptor>,
    staged: FxHashMap<String, StagedAssembly>,
    next_handle: u32,
}

impl ClrState {
    fn insert_namespace(&mut self, path: &str) {
        let mut prefix = String::new();
        for segment in path.split('.') {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(segment);
            self.namespaces.insert(prefix.clone());
        }
    }

    fn insert_type(&mut self, handle: TypeHandle) {
        let qualified = handle.qualified_name.as_str().to_string();
        if let Some(parent) = handle.qualified_name.parent() {
            if !parent.is_root() {
                self.insert_namespace(parent.as_str());
            }
        }
        self.types.entry(qualified).or_default().push(handle);
    }
}

/// Fake reflection universe shared by value.
#[derive(Clone, Default)]
pub struct FakeClr(Rc<RefCell<ClrState>>);

impl FakeClr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a namespace and all its dotted prefixes.
    pub fn add_namespace(&self, path: &str) {
        self.0.borrow_mut().insert_namespace(path);
    }

    /// Register a public type; parent namespaces are registered too.
    pub fn add_type(&self, qualified: &str, assembly: &str) {
        let handle = TypeHandle::new(QualifiedName::new(qualified).unwrap(), assembly);
        self.0.borrow_mut().insert_type(handle);
    }

    /// Register an open generic definition under its mangled name, plus the
    /// demangling rule from its base name ("List" → "List`1").
    pub fn add_generic_type(&self, qualified_mangled: &str, assembly: &str, arity: u8) {
        let qualified = QualifiedName::new(qualified_mangled).unwrap();
        let namespace = qualified.parent().unwrap_or_else(QualifiedName::root);
        let mangled_short = qualified.simple_name().to_string();
        let base_short = mangled_short
            .split('`')
            .next()
            .unwrap_or(&mangled_short)
            .to_string();

        let handle = TypeHandle::generic(qualified, assembly, arity);
        let mut state = self.0.borrow_mut();
        state.insert_type(handle);
        state
            .generics
            .insert((namespace.as_str().to_string(), base_short), mangled_short);
    }

    /// Stage an assembly that becomes visible once loaded through the given
    /// strategy. `AlreadyLoaded` assemblies register their descriptor
    /// immediately.
    pub fn stage_assembly(
        &self,
        ident: &str,
        strategy: LoadStrategy,
        namespaces: &[&str],
        types: &[&str],
    ) {
        let name = AssemblyName::parse(ident).unwrap_or_else(|| AssemblyName::short(ident));
        let short = name.short_name.clone();
        let mut state = self.0.borrow_mut();
        if strategy == LoadStrategy::AlreadyLoaded {
            state.assemblies.push(AssemblyDescriptor::new(name));
        }
        state.staged.insert(
            ident.to_string(),
            StagedAssembly {
                strategy,
                namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
                types: types.iter().map(|t| (t.to_string(), short.clone())).collect(),
            },
        );
    }

    /// Descriptors currently visible, in load order.
    pub fn descriptors(&self) -> Vec<AssemblyDescriptor> {
        self.0.borrow().assemblies.clone()
    }

    fn commit(&self, ident: &str, strategy: LoadStrategy) -> Option<AssemblyHandle> {
        let mut state = self.0.borrow_mut();
        let staged = state.staged.get(ident)?;
        if staged.strategy != strategy {
            return None;
        }
        let staged = state.staged.remove(ident).unwrap();

        let name = AssemblyName::parse(ident).unwrap_or_else(|| AssemblyName::short(ident));
        state.assemblies.push(AssemblyDescriptor::new(name));
        for (qualified, assembly) in &staged.types {
            let handle = TypeHandle::new(QualifiedName::new(qualified).unwrap(), assembly.clone());
            // Parent namespaces become visible only at rescan.
            let parent = handle.qualified_name.parent();
            state
                .types
                .entry(qualified.clone())
                .or_default()
                .push(handle);
            if let Some(parent) = parent {
                if !parent.is_root() {
                    state.pending_namespaces.push(parent.as_str().to_string());
                }
            }
        }
        state
            .pending_namespaces
            .extend(staged.namespaces.iter().cloned());

        state.next_handle += 1;
        Some(AssemblyHandle(state.next_handle))
    }
}

impl AssemblyManager for FakeClr {
    fn is_valid_namespace(&self, qualified: &QualifiedName) -> bool {
        self.0.borrow().namespaces.contains(qualified.as_str())
    }

    fn public_types(&self, qualified: &QualifiedName) -> Vec<TypeHandle> {
        self.0
            .borrow()
            .types
            .get(qualified.as_str())
            .cloned()
            .unwrap_or_default()
    }

    fn direct_child_names(&self, qualified: &QualifiedName) -> Vec<String> {
        let state = self.0.borrow();
        let prefix = if qualified.is_root() {
            String::new()
        } else {
            format!("{}.", qualified.as_str())
        };

        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        };

        for namespace in &state.namespaces {
            if let Some(rest) = namespace.strip_prefix(&prefix) {
                if !rest.is_empty() && namespace.len() > prefix.len() {
                    push(rest.split('.').next().unwrap());
                }
            }
        }
        for qualified_type in state.types.keys() {
            if let Some(rest) = qualified_type.strip_prefix(&prefix) {
                if !rest.is_empty() && !rest.contains('.') {
                    push(rest);
                }
            }
        }
        names.sort();
        names
    }

    fn demangle_generic(&self, namespace: &QualifiedName, short_name: &str) -> Option<String> {
        self.0
            .borrow()
            .generics
            .get(&(namespace.as_str().to_string(), short_name.to_string()))
            .cloned()
    }

    fn assemblies_for(&self, namespace: &QualifiedName) -> Vec<AssemblyDescriptor> {
        let state = self.0.borrow();
        let mut shorts: Vec<String> = Vec::new();
        for handles in state.types.values() {
            for handle in handles {
                let in_namespace = handle
                    .qualified_name
                    .parent()
                    .is_some_and(|p| p == *namespace);
                if in_namespace && !shorts.contains(&handle.assembly) {
                    shorts.push(handle.assembly.clone());
                }
            }
        }
        state
            .assemblies
            .iter()
            .filter(|d| shorts.iter().any(|s| s == d.short_name()))
            .cloned()
            .collect()
    }

    fn loaded_namespaces(&self) -> FxHashSet<String> {
        self.0.borrow().namespaces.clone()
    }

    fn loaded_assemblies(&self) -> Vec<AssemblyDescriptor> {
        self.0.borrow().assemblies.clone()
    }

    fn find_loaded(&self, ident: &str) -> Option<AssemblyHandle> {
        let state = self.0.borrow();
        state
            .assemblies
            .iter()
            .position(|d| d.short_name() == ident)
            .map(|i| AssemblyHandle(u32::MAX - i as u32))
    }

    fn load_file(&mut self, path: &str) -> Option<AssemblyHandle> {
        self.commit(path, LoadStrategy::File)
    }

    fn load_by_name(&mut self, name: &AssemblyName) -> Option<AssemblyHandle> {
        self.commit(&name.short_name, LoadStrategy::ByName)
    }

    fn load_full_path(&mut self, path: &str) -> Option<AssemblyHandle> {
        self.commit(path, LoadStrategy::FullPath)
    }

    fn rescan(&mut self) {
        let mut state = self.0.borrow_mut();
        let pending = std::mem::take(&mut state.pending_namespaces);
        for namespace in pending {
            state.insert_namespace(&namespace);
        }
    }
}

/// Binder memoizing wrappers by type identity.
#[derive(Default)]
pub struct MemoBinder {
    bound: FxHashMap<TypeHash, Rc<BoundType>>,
}

impl TypeBinder for MemoBinder {
    fn bind(&mut self, handle: &TypeHandle) -> Rc<BoundType> {
        self.bound
            .entry(handle.type_hash())
            .or_insert_with(|| Rc::new(BoundType::new(handle.clone())))
            .clone()
    }
}

/// Hooks that record every discovery notification.
#[derive(Clone, Default)]
pub struct RecordingHooks(pub Rc<RefCell<Vec<String>>>);

impl ImportHooks for RecordingHooks {
    fn notify_namespace_discovered(&mut self, qualified: &str) {
        self.0.borrow_mut().push(qualified.to_string());
    }
}

/// Attribute table whose writes always fail.
pub struct FailingTable;

impl AttributeTable for FailingTable {
    fn try_get(&self, _name: &str) -> Option<ModuleEntry> {
        None
    }

    fn set(&mut self, _name: &str, _entry: ModuleEntry) -> Result<(), TableWriteError> {
        Err(TableWriteError::new("table rejects writes"))
    }
}

/// Context over a fake universe with a memoizing binder and recording hooks.
pub fn host(clr: &FakeClr) -> HostContext {
    HostContext::new(
        Box::new(clr.clone()),
        Box::new(MemoBinder::default()),
        Box::new(RecordingHooks::default()),
    )
}

/// Like [`host`], but the caller keeps the notification log.
pub fn host_recording(clr: &FakeClr, log: &RecordingHooks) -> HostContext {
    HostContext::new(
        Box::new(clr.clone()),
        Box::new(MemoBinder::default()),
        Box::new(log.clone()),
    )
}
