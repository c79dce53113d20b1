//! Static schema descriptors for configuration types.
//!
//! Configuration types describe themselves through [`Describe`]: leaves report
//! a [`Shape`], sections report an ordered list of [`FieldDescriptor`]s. The
//! documentation engine walks these descriptors instead of inspecting values
//! at run time.

mod annotation;
mod category;
mod describe;
mod values;


pub use annotation::DocAnnotation;
pub use category::{Category, CategoryOverrides, UnknownCategory};
pub use describe::{Describe, ExampleDoc, FieldDescriptor, Shape, TypeInfo, short_type_name};
pub use values::{
    LABEL_SELECTORS_TYPE, LabelSelectors, LogFormat, LogLevel, Secret, StringSliceCsv,
    TRACKER_MATCHERS_TYPE, Timestamp, TrackerMatchers, UrlValue, format_duration, parse_duration,
};
