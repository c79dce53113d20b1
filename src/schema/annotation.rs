use std::collections::HashMap;

const HIDDEN: &str = "hidden";
const NO_CLI: &str = "nocli";
const REQUIRED: &str = "required";
const DEFAULT: &str = "default";
const DESCRIPTION: &str = "description";

/// Parsed per-field doc annotation.
///
/// The annotation is a pipe-separated list of `key` or `key=value` tokens:
///
/// ```
/// use confdoc::schema::DocAnnotation;
///
/// let annotation = DocAnnotation::parse("required|default=30s|description=Poll interval.");
/// assert!(annotation.is_required());
/// assert_eq!(annotation.default_value(), Some("30s"));
/// assert_eq!(annotation.description(), Some("Poll interval."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocAnnotation {
    entries: HashMap<String, String>,
    malformed: Vec<String>,
}

impl DocAnnotation {
    /// Parses an annotation string; the empty string yields an empty annotation.
    ///
    /// A token with an empty key (`a||b`, `=x`, a trailing `|`) is recorded
    /// under [`DocAnnotation::malformed`] and the remaining tokens still apply.
    pub fn parse(annotation: &str) -> Self {
        let mut parsed = Self::default();

        if annotation.is_empty() {
            return parsed;
        }

        for token in annotation.split('|') {
            let (key, value) = token.split_once('=').unwrap_or((token, ""));

            if key.is_empty() {
                parsed.malformed.push(token.to_string());
                continue;
            }

            parsed.entries.insert(key.to_string(), value.to_string());
        }

        parsed
    }

    /// Tokens that had no key.
    pub fn malformed(&self) -> &[String] {
        &self.malformed
    }

    /// Whether `key` is present, with or without a value.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Non-empty value of `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Field is left out of the documentation.
    pub fn is_hidden(&self) -> bool {
        self.has(HIDDEN)
    }

    /// Field is never exposed as a command-line flag.
    pub fn is_absent_in_cli(&self) -> bool {
        self.has(NO_CLI)
    }

    /// Field must be set explicitly.
    pub fn is_required(&self) -> bool {
        self.has(REQUIRED)
    }

    /// Documented default overriding the flag default.
    pub fn default_value(&self) -> Option<&str> {
        self.value(DEFAULT)
    }

    /// Documented description overriding the flag usage.
    pub fn description(&self) -> Option<&str> {
        self.value(DESCRIPTION)
    }
}
