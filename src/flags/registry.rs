use std::collections::HashMap;

use tracing::{debug, warn};

use super::{FlagKey, FlagSet, RegisterFlags};

/// Default text marking a flag that only exists for compatibility.
pub const DEPRECATED_DEFAULT: &str = "deprecated";

/// Flag metadata the documentation engine attaches to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagInfo {
    /// Full flag name.
    pub name: String,
    /// Help text.
    pub usage: String,
    /// Textual default.
    pub default_value: String,
}

/// Lookup from field key to the flag registered for it.
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    flags: HashMap<FlagKey, FlagInfo>,
}

impl FlagRegistry {
    /// Registers the flags of a fresh `T::default()` and collects them.
    ///
    /// The throwaway instance keeps registration side effects away from any
    /// configuration the caller is holding.
    pub fn collect<T: RegisterFlags + Default>() -> Self {
        Self::from_config(&T::default())
    }

    /// Registers the flags of `config` and collects them.
    pub fn from_config<T: RegisterFlags>(config: &T) -> Self {
        let mut set = FlagSet::new();
        config.register_flags(&mut set.scope());
        Self::from_flag_set(set)
    }

    /// Builds the lookup from registered flags, dropping deprecated ones.
    ///
    /// When two flags bind the same field the first registration wins.
    pub fn from_flag_set(set: FlagSet) -> Self {
        let mut flags: HashMap<FlagKey, FlagInfo> = HashMap::with_capacity(set.len());

        for flag in set {
            if flag.default_value == DEPRECATED_DEFAULT {
                debug!(flag = %flag.name, "Skipping deprecated flag");
                continue;
            }

            if let Some(existing) = flags.get(&flag.key) {
                warn!(
                    key = %flag.key,
                    kept = %existing.name,
                    ignored = %flag.name,
                    "Field bound to more than one flag"
                );
                continue;
            }

            flags.insert(
                flag.key,
                FlagInfo {
                    name: flag.name,
                    usage: flag.usage,
                    default_value: flag.default_value,
                },
            );
        }

        Self { flags }
    }

    /// Flag bound to the field at `key`.
    pub fn get(&self, key: &FlagKey) -> Option<&FlagInfo> {
        self.flags.get(key)
    }

    /// Number of correlatable flags.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no flag is registered.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<(FlagKey, FlagInfo)> for FlagRegistry {
    fn from_iter<I: IntoIterator<Item = (FlagKey, FlagInfo)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
