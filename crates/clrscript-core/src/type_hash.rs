//! Deterministic hash-based identity for reflected types.
//!
//! This module provides [`TypeHash`], a 64-bit hash computed from a type's
//! qualified name. Bound-type wrappers compare by this hash, and binders use
//! it as their memoization key, so the same foreign type resolved through
//! different aliases still yields equal wrappers.
//!
//! Hashes are computed with XXHash64 under domain-specific seeds so that a
//! type and a module-level member with the same spelling never collide.

use std::fmt;

use xxhash_rust::xxh64::xxh64;

/// Domain seeds for hash computation.
///
/// Distinct seeds keep types and module members in separate hash domains
/// even when they share a name.
pub mod hash_domains {
    /// Seed for reflected type identity.
    pub const TYPE: u64 = 0x6c1b3f9a24d8e507;

    /// Seed for module-level member identity (functions, properties).
    pub const MEMBER: u64 = 0x39f07ce52ab1d964;
}

/// 64-bit deterministic identity hash.
///
/// # Examples
///
/// ```
/// use clrscript_core::TypeHash;
///
/// let a = TypeHash::from_name("System.String");
/// let b = TypeHash::from_name("System.String");
/// assert_eq!(a, b);
///
/// let c = TypeHash::from_name("System.Int32");
/// assert_ne!(a, c);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Compute the hash for a type from its qualified name.
    pub fn from_name(qualified_name: &str) -> Self {
        Self(xxh64(qualified_name.as_bytes(), hash_domains::TYPE))
    }

    /// Compute the hash for a module-level member.
    ///
    /// Lives in a different domain than type hashes, so a member named like
    /// a type does not alias it.
    pub fn from_member(name: &str) -> Self {
        Self(xxh64(name.as_bytes(), hash_domains::MEMBER))
    }

    /// The raw hash value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
