//! Value wrapper types with bespoke documentation handling.

mod duration;
mod log_level;
mod wrappers;

pub use duration::{format_duration, parse_duration};
pub use log_level::{LogFormat, LogLevel};
pub use wrappers::{
    LABEL_SELECTORS_TYPE, LabelSelectors, Secret, StringSliceCsv, TRACKER_MATCHERS_TYPE,
    Timestamp, TrackerMatchers, UrlValue,
};
