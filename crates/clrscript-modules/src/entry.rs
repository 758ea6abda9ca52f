//! Unified resolved-child entry.
//!
//! Resolving a name under a namespace module yields one of four things: a
//! deeper namespace, a bound foreign type, or a module-level function or
//! property wrapper registered through the export table. [`ModuleEntry`]
//! wraps them in a single enum for unified cache storage, the way the
//! registry stores every type kind behind one entry enum.
//!
//! Entries are `Rc`-shared: the owning module's cache and any external
//! holder (the host's binding table, a local variable on the script side)
//! keep the same object alive together.

use std::rc::Rc;

use clrscript_core::BoundType;

use crate::exports::{ModuleFunction, ModuleProperty};
use crate::namespace_module::NamespaceModule;

/// One resolved child of a namespace module.
#[derive(Debug, Clone)]
pub enum ModuleEntry {
    /// A deeper namespace level.
    Namespace(Rc<NamespaceModule>),
    /// A bound foreign type.
    Type(Rc<BoundType>),
    /// A module-level callable wrapper.
    Function(Rc<ModuleFunction>),
    /// A module-level property wrapper.
    Property(Rc<ModuleProperty>),
}

impl ModuleEntry {
    /// Check if this entry is a namespace.
    pub fn is_namespace(&self) -> bool {
        matches!(self, ModuleEntry::Namespace(_))
    }

    /// Check if this entry is a bound type.
    pub fn is_type(&self) -> bool {
        matches!(self, ModuleEntry::Type(_))
    }

    /// The namespace module, if this entry is one.
    pub fn as_namespace(&self) -> Option<&Rc<NamespaceModule>> {
        match self {
            ModuleEntry::Namespace(module) => Some(module),
            _ => None,
        }
    }

    /// The bound type, if this entry is one.
    pub fn as_type(&self) -> Option<&Rc<BoundType>> {
        match self {
            ModuleEntry::Type(bound) => Some(bound),
            _ => None,
        }
    }

    /// Check whether two entries are the same object, not merely equal.
    pub fn same_identity(&self, other: &ModuleEntry) -> bool {
        match (self, other) {
            (ModuleEntry::Namespace(a), ModuleEntry::Namespace(b)) => Rc::ptr_eq(a, b),
            (ModuleEntry::Type(a), ModuleEntry::Type(b)) => Rc::ptr_eq(a, b),
            (ModuleEntry::Function(a), ModuleEntry::Function(b)) => Rc::ptr_eq(a, b),
            (ModuleEntry::Property(a), ModuleEntry::Property(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Equality by what the entry denotes: namespaces by qualified name, types
/// by identity hash, wrappers by name. Two equal entries need not be the
/// same allocation (generic aliasing produces equal-but-distinct entries).
impl PartialEq for ModuleEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ModuleEntry::Namespace(a), ModuleEntry::Namespace(b)) => {
                a.qualified_name() == b.qualified_name()
            }
            (ModuleEntry::Type(a), ModuleEntry::Type(b)) => a == b,
            (ModuleEntry::Function(a), ModuleEntry::Function(b)) => a.name() == b.name(),
            (ModuleEntry::Property(a), ModuleEntry::Property(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl Eq for ModuleEntry {}
