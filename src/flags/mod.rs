//! Command-line flag registration keyed by configuration field.
//!
//! Configuration types register their flags into a [`FlagSet`] through a
//! [`FlagScope`]. Every flag is bound to the [`FlagKey`] of the field it sets,
//! the dot-joined path of Rust identifiers from the root section. The
//! resulting [`FlagRegistry`] is what the documentation engine correlates
//! fields against; flag names and documented names are free to differ.

mod registry;


use std::fmt;

pub use registry::{DEPRECATED_DEFAULT, FlagInfo, FlagRegistry};

/// Path of Rust field identifiers from the root section to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlagKey(String);

impl FlagKey {
    /// Key of the root section itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Key of field `ident` below this one.
    pub fn child(&self, ident: &str) -> Self {
        if self.0.is_empty() {
            Self(ident.to_string())
        } else {
            Self(format!("{}.{ident}", self.0))
        }
    }

    /// Dot-joined path.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FlagKey {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl fmt::Display for FlagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// Field the flag sets.
    pub key: FlagKey,
    /// Full flag name, without leading dashes.
    pub name: String,
    /// Help text.
    pub usage: String,
    /// Textual default, taken from the registering instance.
    pub default_value: String,
}

/// Flags in registration order.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    /// Creates an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope for registering the root section's flags.
    pub fn scope(&mut self) -> FlagScope<'_> {
        FlagScope {
            set: self,
            key: FlagKey::root(),
            name_prefix: String::new(),
        }
    }

    /// Registered flags, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    /// Number of registered flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl IntoIterator for FlagSet {
    type Item = Flag;
    type IntoIter = std::vec::IntoIter<Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.flags.into_iter()
    }
}

/// Registration view of one section inside a [`FlagSet`].
///
/// Carries the section's field key and flag-name prefix, so nested sections
/// register the same way wherever they are mounted.
pub struct FlagScope<'a> {
    set: &'a mut FlagSet,
    key: FlagKey,
    name_prefix: String,
}

impl FlagScope<'_> {
    /// Registers flag `name` (prefixed by the scope) for field `ident`.
    pub fn register(&mut self, ident: &str, name: &str, default: impl fmt::Display, usage: &str) {
        self.set.flags.push(Flag {
            key: self.key.child(ident),
            name: format!("{}{name}", self.name_prefix),
            usage: usage.to_string(),
            default_value: default.to_string(),
        });
    }

    /// Registers a flag kept for compatibility; it never reaches the documentation.
    pub fn deprecated(&mut self, ident: &str, name: &str, usage: &str) {
        self.register(ident, name, DEPRECATED_DEFAULT, usage);
    }

    /// Scope for the section stored in field `ident`, with `name_prefix`
    /// appended to the current flag-name prefix.
    pub fn nested(&mut self, ident: &str, name_prefix: &str) -> FlagScope<'_> {
        FlagScope {
            key: self.key.child(ident),
            name_prefix: format!("{}{name_prefix}", self.name_prefix),
            set: &mut *self.set,
        }
    }

    /// Key of the section this scope registers for.
    pub fn key(&self) -> &FlagKey {
        &self.key
    }
}

/// Types that expose their fields as command-line flags.
///
/// Defaults are read from `self`, so registering a freshly defaulted instance
/// documents the built-in defaults.
pub trait RegisterFlags {
    /// Registers this section's flags into `flags`.
    fn register_flags(&self, flags: &mut FlagScope<'_>);
}
