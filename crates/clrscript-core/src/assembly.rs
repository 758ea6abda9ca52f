//! Assembly identity types.
//!
//! [`AssemblyName`] is the structured form of a display name like
//! `"Acme.Core, Version=1.2.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089"`.
//! Parsing is lenient about which parts are present; the short name alone is
//! a valid assembly name. [`AssemblyDescriptor`] describes one loaded
//! assembly for listing, and [`AssemblyHandle`] is the opaque token the
//! loader returns.

use std::fmt;

/// Four-part assembly version (`major.minor.build.revision`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssemblyVersion(pub u16, pub u16, pub u16, pub u16);

impl AssemblyVersion {
    fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split('.').map(|p| p.trim().parse::<u16>());
        let major = parts.next()?.ok()?;
        let minor = parts.next()?.ok()?;
        let build = parts.next()?.ok()?;
        let revision = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self(major, minor, build, revision))
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.0, self.1, self.2, self.3)
    }
}

/// Structured assembly identity.
///
/// # Examples
///
/// ```
/// use clrscript_core::AssemblyName;
///
/// let name = AssemblyName::parse(
///     "Acme.Core, Version=1.2.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
/// )
/// .unwrap();
/// assert_eq!(name.short_name, "Acme.Core");
/// assert_eq!(name.version.unwrap().to_string(), "1.2.0.0");
///
/// // A bare short name parses too
/// assert!(AssemblyName::parse("Acme.Core").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyName {
    /// Short assembly name ("Acme.Core").
    pub short_name: String,
    /// Version, when the display name carried one.
    pub version: Option<AssemblyVersion>,
    /// Culture; "neutral" when the display name said so.
    pub culture: Option<String>,
    /// Public key token as lowercase hex, `None` for "null" or absent.
    pub public_key_token: Option<String>,
}

impl AssemblyName {
    /// Create a name with only the short-name part.
    pub fn short(name: impl Into<String>) -> Self {
        Self {
            short_name: name.into(),
            version: None,
            culture: None,
            public_key_token: None,
        }
    }

    /// Parse a display name.
    ///
    /// Returns `None` when the string is not a well-formed assembly display
    /// name; callers treat that as "this identifier is not a structured
    /// name", not as an error.
    pub fn parse(display: &str) -> Option<Self> {
        let mut parts = display.split(',');
        let short_name = parts.next()?.trim();
        if short_name.is_empty() || short_name.contains(['/', '\\']) {
            return None;
        }

        let mut name = Self::short(short_name);
        for part in parts {
            let (key, value) = part.split_once('=')?;
            match key.trim() {
                "Version" => name.version = Some(AssemblyVersion::parse(value.trim())?),
                "Culture" => name.culture = Some(value.trim().to_string()),
                "PublicKeyToken" => {
                    let token = value.trim();
                    name.public_key_token = if token.eq_ignore_ascii_case("null") {
                        None
                    } else {
                        Some(token.to_ascii_lowercase())
                    };
                }
                // Unknown qualifiers (ProcessorArchitecture, Retargetable)
                // are tolerated and dropped.
                _ => {}
            }
        }
        Some(name)
    }

    /// The full display name, including only the parts that are present.
    pub fn full_name(&self) -> String {
        let mut out = self.short_name.clone();
        if let Some(version) = self.version {
            out.push_str(&format!(", Version={version}"));
        }
        if let Some(culture) = &self.culture {
            out.push_str(&format!(", Culture={culture}"));
        }
        if self.version.is_some() || self.culture.is_some() {
            match &self.public_key_token {
                Some(token) => out.push_str(&format!(", PublicKeyToken={token}")),
                None => out.push_str(", PublicKeyToken=null"),
            }
        }
        out
    }
}

impl fmt::Display for AssemblyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_name())
    }
}

/// One loaded assembly, as reported by the assembly manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyDescriptor {
    /// Structured identity.
    pub name: AssemblyName,
    /// Filesystem location, when the assembly was loaded from disk.
    pub location: Option<String>,
}

impl AssemblyDescriptor {
    /// Create a descriptor with no known location.
    pub fn new(name: AssemblyName) -> Self {
        Self {
            name,
            location: None,
        }
    }

    /// Short name ("Acme.Core").
    pub fn short_name(&self) -> &str {
        &self.name.short_name
    }

    /// Full display name including version/culture/token when present.
    pub fn full_name(&self) -> String {
        self.name.full_name()
    }
}

/// Opaque token for one loaded assembly, minted by the assembly manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssemblyHandle(pub u32);
