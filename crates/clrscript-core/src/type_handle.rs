//! Reflected type descriptors and the bound-type wrapper.
//!
//! A [`TypeHandle`] is what the reflection side reports about one foreign
//! type: its qualified name, the assembly it came from, and a set of
//! attribute flags. A [`BoundType`] is the reusable wrapper a
//! [`TypeBinder`](crate::TypeBinder) produces from a handle, safe to hand to
//! the host environment repeatedly. Binders memoize by [`TypeHash`], so one
//! foreign type has one wrapper no matter how many aliases reach it.

use bitflags::bitflags;

use crate::{QualifiedName, TypeHash};

bitflags! {
    /// Attribute flags on a reflected foreign type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeAttributes: u32 {
        /// Externally visible.
        const PUBLIC = 1 << 0;
        /// Cannot be derived from.
        const SEALED = 1 << 1;
        /// Interface type.
        const INTERFACE = 1 << 2;
        /// Value (non-reference) type.
        const VALUE_TYPE = 1 << 3;
        /// Open generic definition (arity encoded in the mangled name).
        const GENERIC_DEFINITION = 1 << 4;
        /// Nested inside another type.
        const NESTED = 1 << 5;
    }
}

/// Descriptor for one reflected foreign type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandle {
    /// Fully qualified type name, mangled for generics ("…Generic.List`1").
    pub qualified_name: QualifiedName,
    /// Short name of the declaring assembly.
    pub assembly: String,
    /// Attribute flags.
    pub attributes: TypeAttributes,
    /// Number of generic parameters; zero for non-generic types.
    pub generic_arity: u8,
}

impl TypeHandle {
    /// Create a public, non-generic type handle.
    pub fn new(qualified_name: QualifiedName, assembly: impl Into<String>) -> Self {
        Self {
            qualified_name,
            assembly: assembly.into(),
            attributes: TypeAttributes::PUBLIC,
            generic_arity: 0,
        }
    }

    /// Create a public open generic definition with the given arity.
    pub fn generic(
        qualified_name: QualifiedName,
        assembly: impl Into<String>,
        arity: u8,
    ) -> Self {
        Self {
            qualified_name,
            assembly: assembly.into(),
            attributes: TypeAttributes::PUBLIC | TypeAttributes::GENERIC_DEFINITION,
            generic_arity: arity,
        }
    }

    /// Identity hash, computed from the qualified name.
    pub fn type_hash(&self) -> TypeHash {
        TypeHash::from_name(self.qualified_name.as_str())
    }

    /// The unqualified (possibly mangled) type name.
    pub fn simple_name(&self) -> &str {
        self.qualified_name.simple_name()
    }

    /// Check if the type is externally visible.
    pub fn is_public(&self) -> bool {
        self.attributes.contains(TypeAttributes::PUBLIC)
    }

    /// Check if the type is an open generic definition.
    pub fn is_generic_definition(&self) -> bool {
        self.attributes.contains(TypeAttributes::GENERIC_DEFINITION)
    }
}

/// Reusable wrapper over one foreign type.
///
/// Equality is by type identity: two wrappers over the same qualified type
/// compare equal even if they are distinct allocations.
#[derive(Debug, Clone)]
pub struct BoundType {
    handle: TypeHandle,
    hash: TypeHash,
}

impl BoundType {
    /// Wrap a reflected type handle.
    pub fn new(handle: TypeHandle) -> Self {
        let hash = handle.type_hash();
        Self { handle, hash }
    }

    /// The underlying reflected handle.
    pub fn handle(&self) -> &TypeHandle {
        &self.handle
    }

    /// The identity hash.
    pub fn type_hash(&self) -> TypeHash {
        self.hash
    }

    /// The fully qualified type name.
    pub fn qualified_name(&self) -> &QualifiedName {
        &self.handle.qualified_name
    }
}

impl PartialEq for BoundType {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for BoundType {}
