//! Error types for the namespace bridge.
//!
//! Two deliberate non-errors shape this taxonomy:
//!
//! - A name that does not resolve is `Ok(None)` at the resolution API, never
//!   an error. Negative results are not cached, so a later lookup can succeed
//!   once more assemblies are loaded.
//! - Multiple public types sharing a qualified name resolve silently to the
//!   first one in resolver order. That ambiguity is documented, not reported.
//!
//! What remains are structural failures: invalid names at construction,
//! a host attribute-table write that failed mid-store, and an assembly
//! identifier that no load strategy could satisfy.

use thiserror::Error;

/// Errors from namespace construction, resolution, and assembly loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A non-root namespace node was constructed with an empty name.
    #[error("namespace name cannot be empty")]
    EmptyName,

    /// A qualified name contained an empty segment.
    #[error("invalid qualified name: '{name}'")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// The host attribute-table write backing a store failed.
    ///
    /// The write runs before cache insertion, so the cache never holds an
    /// entry the host table rejected.
    #[error("failed to store attribute '{name}': {reason}")]
    AttributeWrite {
        /// The attribute being stored.
        name: String,
        /// The host-reported failure.
        reason: String,
    },

    /// All four assembly load strategies failed for an identifier.
    #[error("assembly not found: '{ident}'")]
    AssemblyNotFound {
        /// The identifier as requested by the caller.
        ident: String,
    },
}

/// Errors from building the module export registration table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A provider declared the same export name twice.
    #[error("duplicate export '{name}' declared by provider '{provider}'")]
    DuplicateExport {
        /// The duplicated export name.
        name: String,
        /// The provider that declared it twice.
        provider: String,
    },
}

/// Failure reported by a host attribute table on write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct TableWriteError {
    /// Host-side description of the failure.
    pub reason: String,
}

impl TableWriteError {
    /// Create a write error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The unified error type for all bridge operations.
///
/// Wraps the phase-specific error types; each variant converts with `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClrScriptError {
    /// A resolution or assembly-loading error.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// An export-table registration error.
    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

impl ClrScriptError {
    /// Check if this is a resolution error.
    pub fn is_resolve(&self) -> bool {
        matches!(self, ClrScriptError::Resolve(_))
    }

    /// Check if this is a registration error.
    pub fn is_registration(&self) -> bool {
        matches!(self, ClrScriptError::Registration(_))
    }
}
