use std::fmt;

use crate::ResolveError;

/// Dot-separated qualified name for namespaces and types in the foreign
/// runtime ("System.Collections.Generic").
///
/// Used as the primary key for namespace materialization. The root namespace
/// is the empty name; every other name has one or more non-empty segments.
/// Names are case-sensitive.
///
/// # Examples
///
/// ```
/// use clrscript_core::QualifiedName;
///
/// let root = QualifiedName::root();
/// assert!(root.is_root());
///
/// let generic = QualifiedName::new("System.Collections.Generic").unwrap();
/// assert_eq!(generic.simple_name(), "Generic");
/// assert_eq!(generic.parent().unwrap().to_string(), "System.Collections");
///
/// // Children are built from the parent, root included
/// assert_eq!(root.child("System").to_string(), "System");
/// assert_eq!(generic.child("List`1").to_string(), "System.Collections.Generic.List`1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName(String);

impl QualifiedName {
    /// The root (unnamed) namespace.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Create a qualified name from a dotted string.
    ///
    /// Rejects the empty string (use [`QualifiedName::root`]) and names with
    /// empty segments such as `"System..Generic"` or `".System"`.
    pub fn new(name: impl Into<String>) -> Result<Self, ResolveError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ResolveError::EmptyName);
        }
        if name.split('.').any(|segment| segment.is_empty()) {
            return Err(ResolveError::InvalidName { name });
        }
        Ok(Self(name))
    }

    /// Check whether this is the root namespace.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The full dotted name. Empty for the root.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last segment, or the empty string for the root.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or("")
    }

    /// Iterate over the dotted segments. Empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Build the qualified name of a direct child.
    ///
    /// `"System.Collections" + "Generic"` is `"System.Collections.Generic"`;
    /// a child of the root is just the short name.
    pub fn child(&self, short_name: &str) -> Self {
        if self.is_root() {
            Self(short_name.to_string())
        } else {
            Self(format!("{}.{}", self.0, short_name))
        }
    }

    /// The parent namespace, if any.
    ///
    /// `"System.Collections"` has parent `"System"`; a single-segment name
    /// has the root as parent; the root has none.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('.') {
            Some(pos) => Some(Self(self.0[..pos].to_string())),
            None => Some(Self::root()),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for QualifiedName {
    type Error = ResolveError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}
