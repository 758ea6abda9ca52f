//! Benchmarks for namespace resolution and preload over a synthetic
//! reflected universe.

use std::cell::RefCell;
use std::hint::black_box;
use std::rc::Rc;

use clrscript::prelude::*;
use criterion::{Criterion, criterion_group, criterion_main};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Default)]
struct UniverseState {
    namespaces: FxHashSet<String>,
    types: FxHashMap<String, Vec<TypeHandle>>,
}

#[derive(Clone, Default)]
struct Universe(Rc<RefCell<UniverseState>>);

impl Universe {
    /// `namespaces` top-level namespaces with `types_per_namespace` types each.
    fn synthetic(namespaces: usize, types_per_namespace: usize) -> Self {
        let universe = Self::default();
        let mut state = universe.0.borrow_mut();
        for n in 0..namespaces {
            let namespace = format!("Acme.Area{n}");
            state.namespaces.insert("Acme".to_string());
            state.namespaces.insert(namespace.clone());
            for t in 0..types_per_namespace {
                let qualified = format!("{namespace}.Type{t}");
                state.types.insert(
                    qualified.clone(),
                    vec![TypeHandle::new(
                        QualifiedName::new(&qualified).unwrap(),
                        "Acme.Core",
                    )],
                );
            }
        }
        drop(state);
        universe
    }
}

impl AssemblyManager for Universe {
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
        for known in state.namespaces.iter().chain(state.types.keys()) {
            if let Some(rest) = known.strip_prefix(&prefix) {
                if rest.is_empty() {
                    continue;
                }
                let first = rest.split('.').next().unwrap().to_string();
                if !names.contains(&first) {
                    names.push(first);
                }
            }
        }
        names
    }

    fn demangle_generic(&self, _namespace: &QualifiedName, _short: &str) -> Option<String> {
        None
    }

    fn assemblies_for(&self, _namespace: &QualifiedName) -> Vec<AssemblyDescriptor> {
        Vec::new()
    }

    fn loaded_namespaces(&self) -> FxHashSet<String> {
        self.0.borrow().namespaces.clone()
    }

    fn loaded_assemblies(&self) -> Vec<AssemblyDescriptor> {
        Vec::new()
    }

    fn find_loaded(&self, _ident: &str) -> Option<AssemblyHandle> {
        None
    }

    fn load_file(&mut self, _path: &str) -> Option<AssemblyHandle> {
        None
    }

    fn load_by_name(&mut self, _name: &AssemblyName) -> Option<AssemblyHandle> {
        None
    }

    fn load_full_path(&mut self, _path: &str) -> Option<AssemblyHandle> {
        None
    }

    fn rescan(&mut self) {}
}

#[derive(Default)]
struct MemoBinder {
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

struct NoHooks;

impl ImportHooks for NoHooks {
    fn notify_namespace_discovered(&mut self, _qualified: &str) {}
}

fn host_over(universe: &Universe) -> HostContext {
    HostContext::new(
        Box::new(universe.clone()),
        Box::new(MemoBinder::default()),
        Box::new(NoHooks),
    )
}

fn bench_resolution(c: &mut Criterion) {
    let universe = Universe::synthetic(50, 20);

    c.bench_function("resolve_cached", |b| {
        let mut host = host_over(&universe);
        let root = RootModule::with_default_exports(&mut host).unwrap();
        root.import_module("Acme.Area0.Type0", &mut host).unwrap();
        b.iter(|| {
            black_box(
                root.import_module(black_box("Acme.Area0.Type0"), &mut host)
                    .unwrap(),
            )
        })
    });

    c.bench_function("resolve_cold", |b| {
        b.iter(|| {
            let mut host = host_over(&universe);
            let root = RootModule::with_default_exports(&mut host).unwrap();
            black_box(root.import_module("Acme.Area25.Type10", &mut host).unwrap())
        })
    });

    c.bench_function("preload_namespace", |b| {
        b.iter(|| {
            let mut host = host_over(&universe);
            let root = RootModule::with_default_exports(&mut host).unwrap();
            let area = root
                .import_module("Acme.Area10", &mut host)
                .unwrap()
                .unwrap();
            let area = area.as_namespace().unwrap().clone();
            area.preload(&mut host).unwrap();
            black_box(area.exported_names().len())
        })
    });
}

criterion_group!(benches, bench_resolution);
criterion_main!(benches);
