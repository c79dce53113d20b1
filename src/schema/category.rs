use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Audience of a configuration field.
///
/// Renderers typically show basic fields first and flag the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Fields most operators need to know about.
    #[default]
    Basic,

    /// Tuning knobs for specific deployments.
    Advanced,

    /// Fields whose behavior may still change.
    Experimental,

    /// Fields scheduled for removal.
    Deprecated,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Basic => write!(f, "basic"),
            Category::Advanced => write!(f, "advanced"),
            Category::Experimental => write!(f, "experimental"),
            Category::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// Label that does not name a [`Category`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown field category '{0}'")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Category::Basic),
            "advanced" => Ok(Category::Advanced),
            "experimental" => Ok(Category::Experimental),
            "deprecated" => Ok(Category::Deprecated),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Category assignments keyed by flag name.
///
/// Consulted before the category declared on a field, so a deployment can
/// reclassify flags without touching the configuration types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryOverrides(HashMap<String, Category>);

impl CategoryOverrides {
    /// Creates an empty override table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Category assigned to `flag_name`, if any.
    pub fn get(&self, flag_name: &str) -> Option<Category> {
        self.0.get(flag_name).copied()
    }

    /// Number of overrides.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds every override of `other`, replacing existing assignments.
    pub fn extend(&mut self, other: CategoryOverrides) {
        self.0.extend(other.0);
    }
}

impl<S: Into<String>> FromIterator<(S, Category)> for CategoryOverrides {
    fn from_iter<I: IntoIterator<Item = (S, Category)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(flag, category)| (flag.into(), category))
                .collect(),
        )
    }
}
