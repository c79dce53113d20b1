//! Correlation between documented fields and registered flags.

use crate::{
    flags::{FlagInfo, FlagKey, FlagRegistry},
    schema::{DocAnnotation, Shape},
};

/// Flag bound to the field at `key`.
///
/// Fields annotated `nocli` never resolve. A field without a registered flag
/// is documented but not flaggable, which is not an error.
pub fn resolve<'a>(
    key: &FlagKey,
    annotation: &DocAnnotation,
    flags: &'a FlagRegistry,
) -> Option<&'a FlagInfo> {
    if annotation.is_absent_in_cli() {
        return None;
    }

    flags.get(key)
}

/// Value wrappers whose semantic type is fixed regardless of their
/// representation.
///
/// Their flag defaults are documented as registered: rendering them (a
/// canonical duration, a redacted secret) is up to the `Display` passed to
/// [`FlagScope::register`](crate::flags::FlagScope::register).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialType {
    /// Duration wrapper.
    Duration,
    /// URL wrapper.
    Url,
    /// Secret wrapper.
    Secret,
    /// Point in time wrapper.
    Time,
}

impl SpecialType {
    /// Special type of `shape`, if any.
    pub fn of(shape: &Shape) -> Option<Self> {
        match shape {
            Shape::Duration => Some(SpecialType::Duration),
            Shape::Url => Some(SpecialType::Url),
            Shape::Secret => Some(SpecialType::Secret),
            Shape::Time => Some(SpecialType::Time),
            _ => None,
        }
    }

    /// Fixed semantic type name.
    pub fn semantic_type(self) -> &'static str {
        match self {
            SpecialType::Duration => "duration",
            SpecialType::Url => "url",
            SpecialType::Secret => "string",
            SpecialType::Time => "time",
        }
    }
}
