//! Process-wide bridge configuration.
//!
//! All global toggles live in one explicit struct owned by the composition
//! root, with an explicit [`reset`](BridgeOptions::reset); there is no static
//! mutable state anywhere in the engine.

/// Configuration owned by the composition root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeOptions {
    /// Eagerly preload a namespace's children when the import machinery
    /// materializes it. Off by default; interactive hosts turn it on.
    pub preload: bool,
}

impl BridgeOptions {
    /// Options with all defaults.
    pub fn new() -> Self {
        Self { preload: false }
    }

    /// Restore every option to its default.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::new()
    }
}
