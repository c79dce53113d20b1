use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::json;
use url::Url;

use crate::schema::{Describe, ExampleDoc, Shape};

/// Semantic type name of [`LabelSelectors`].
pub const LABEL_SELECTORS_TYPE: &str = "label_selector...";

/// Semantic type name of [`TrackerMatchers`].
pub const TRACKER_MATCHERS_TYPE: &str = "map of tracker name (string) to matcher (string)";

const REDACTED: &str = "********";

/// Credential that never shows up in logs or rendered defaults.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// Wraps a credential.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Plain-text credential.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether no credential is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&self.to_string()).finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            f.write_str(REDACTED)
        }
    }
}

impl Describe for Secret {
    fn shape() -> Shape {
        Shape::Secret
    }
}

/// Optional URL; unset renders as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrlValue(Option<Url>);

impl UrlValue {
    /// Parses and wraps a URL.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if `text` is not an absolute URL.
    pub fn parse(text: &str) -> Result<Self, url::ParseError> {
        Url::parse(text).map(|url| Self(Some(url)))
    }

    /// Wrapped URL, if set.
    pub fn get(&self) -> Option<&Url> {
        self.0.as_ref()
    }
}

impl fmt::Display for UrlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(url) => f.write_str(url.as_str()),
            None => Ok(()),
        }
    }
}

impl Describe for UrlValue {
    fn shape() -> Shape {
        Shape::Url
    }
}

/// Optional point in time, rendered as RFC 3339.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(Option<DateTime<Utc>>);

impl Timestamp {
    /// Wraps a point in time.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self(Some(time))
    }

    /// Wrapped time, if set.
    pub fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => Ok(()),
        }
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::default());
        }
        DateTime::parse_from_rfc3339(s).map(|time| Self(Some(time.with_timezone(&Utc))))
    }
}

impl Describe for Timestamp {
    fn shape() -> Shape {
        Shape::Time
    }
}

/// List of strings set as a single comma-separated value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringSliceCsv(pub Vec<String>);

impl fmt::Display for StringSliceCsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl FromStr for StringSliceCsv {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }
}

impl Serialize for StringSliceCsv {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StringSliceCsv {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(text.parse().unwrap_or_default())
    }
}

impl Describe for StringSliceCsv {
    fn shape() -> Shape {
        Shape::Custom("string")
    }
}

/// Ordered label selectors applied to incoming series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSelectors(pub Vec<String>);

impl Describe for LabelSelectors {
    fn shape() -> Shape {
        Shape::Custom(LABEL_SELECTORS_TYPE)
    }
}

/// Named series matchers, each tracked as its own active-series counter.
///
/// The flag form is `name:matcher;name:matcher`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackerMatchers(pub BTreeMap<String, String>);

impl fmt::Display for TrackerMatchers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|(name, matcher)| format!("{name}:{matcher}"))
            .collect();
        f.write_str(&pairs.join(";"))
    }
}

impl FromStr for TrackerMatchers {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(';')
            .filter(|pair| !pair.trim().is_empty())
            .map(|pair| {
                pair.split_once(':')
                    .map(|(name, matcher)| (name.trim().to_string(), matcher.trim().to_string()))
                    .filter(|(name, matcher)| !name.is_empty() && !matcher.is_empty())
                    .ok_or_else(|| format!("invalid tracker '{pair}', expected name:matcher"))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }
}

impl Describe for TrackerMatchers {
    fn shape() -> Shape {
        Shape::Custom(TRACKER_MATCHERS_TYPE)
    }

    fn example_doc() -> Option<ExampleDoc> {
        Some(ExampleDoc {
            comment: "Counts active series per tenant for each named matcher, e.g. one \
                      counter for development namespaces and one for production."
                .to_string(),
            value: json!({
                "dev": r#"{namespace=~"dev-.*"}"#,
                "prod": r#"{namespace=~"prod-.*"}"#,
            }),
        })
    }
}
