//! Semantic type names for configurable types.

use std::{collections::HashMap, time::Duration};

use crate::schema::{
    LABEL_SELECTORS_TYPE, LabelSelectors, Shape, TRACKER_MATCHERS_TYPE, Timestamp,
    TrackerMatchers, TypeInfo, UrlValue,
};

use super::UnsupportedTypeError;

/// Canonical semantic type name of `ty`.
///
/// Wrapper types resolve to their fixed names (`duration`, `url`, custom
/// overrides); lists recurse into their element type; maps use the literal
/// short names of their key and value types.
///
/// # Errors
///
/// Returns `UnsupportedTypeError` for callbacks, sections and shapes with no
/// configuration representation.
pub fn classify(ty: &TypeInfo) -> Result<String, UnsupportedTypeError> {
    let shape = ty.shape();

    let name = match shape {
        Shape::Boolean => "boolean".to_string(),
        Shape::Int => "int".to_string(),
        Shape::Float => "float".to_string(),
        Shape::String | Shape::Secret => "string".to_string(),
        Shape::Duration => "duration".to_string(),
        Shape::Url => "url".to_string(),
        Shape::Time => "time".to_string(),
        Shape::Custom(name) => name.to_string(),
        Shape::List(element) => format!("list of {}", classify(&element)?),
        Shape::Map { key, value } => {
            format!("map of {} to {}", key.short_name(), value.short_name())
        }
        Shape::Section(_) | Shape::Callback | Shape::Unsupported(_) => {
            return Err(UnsupportedTypeError {
                kind: shape.kind().to_string(),
                type_name: ty.name(),
            });
        }
    };

    Ok(name)
}

/// Type documented under `semantic_type`, for tooling that needs a
/// placeholder value of a documented field.
///
/// # Panics
///
/// Panics on names outside the built-in table; the table is static, so an
/// unknown name is a programming error. Use [`try_reify`] for untrusted input.
#[allow(clippy::panic)]
pub fn reify(semantic_type: &str) -> TypeInfo {
    match try_reify(semantic_type) {
        Some(ty) => ty,
        None => panic!("unknown field type {semantic_type}"),
    }
}

/// Fallible form of [`reify`].
pub fn try_reify(semantic_type: &str) -> Option<TypeInfo> {
    let ty = match semantic_type {
        "string" => TypeInfo::of::<String>(),
        "url" => TypeInfo::of::<UrlValue>(),
        "duration" => TypeInfo::of::<Duration>(),
        "time" => TypeInfo::of::<Timestamp>(),
        "boolean" => TypeInfo::of::<bool>(),
        "int" => TypeInfo::of::<i64>(),
        "float" => TypeInfo::of::<f64>(),
        "list of string" => TypeInfo::of::<Vec<String>>(),
        "list of duration" => TypeInfo::of::<Vec<Duration>>(),
        "map of String to String" => TypeInfo::of::<HashMap<String, String>>(),
        "map of String to f64" => TypeInfo::of::<HashMap<String, f64>>(),
        TRACKER_MATCHERS_TYPE => TypeInfo::of::<TrackerMatchers>(),
        LABEL_SELECTORS_TYPE => TypeInfo::of::<LabelSelectors>(),
        _ => return None,
    };

    Some(ty)
}

/// Semantic type names [`reify`] accepts.
pub fn reifiable_types() -> &'static [&'static str] {
    &[
        "string",
        "url",
        "duration",
        "time",
        "boolean",
        "int",
        "float",
        "list of string",
        "list of duration",
        "map of String to String",
        "map of String to f64",
        TRACKER_MATCHERS_TYPE,
        LABEL_SELECTORS_TYPE,
    ]
}
