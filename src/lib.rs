//! confdoc - Configuration reference extraction.
//!
//! Turns the static description of a configuration tree into a
//! documentation model: ordered blocks of fields, each correlated with its
//! command-line flag, semantic type, default, category and example. The main
//! pieces are:
//!
//! - Descriptor traits configuration types implement
//! - Flag registration keyed by field path
//! - The extraction engine and its serializable model
//! - A reference service configuration documented by `generate-docs`
//!
//! # Quick Start
//!
//! ```rust
//! use confdoc::{docs::Extractor, reference::{self, ServiceConfig}};
//!
//! let blocks = Extractor::new(reference::root_blocks())
//!     .extract_config::<ServiceConfig>()
//!     .unwrap();
//!
//! assert!(blocks[0].entry("server").is_some());
//! ```

/// Settings of the documentation tool.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Documentation model extraction.
pub mod docs;

/// Command-line flag registration.
pub mod flags;

/// Reference configuration documented by the bundled binary.
pub mod reference;

/// Descriptor traits and value types of documented configurations.
pub mod schema;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{ConfdocError, Result};
