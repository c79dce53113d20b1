//! Documentation model extraction for configuration schemas.
//!
//! Walks the static descriptors of a configuration type, correlates leaf
//! fields with registered command-line flags, and produces an ordered list
//! of [`ConfigBlock`]s ready for a renderer.
//!
//! ## Components
//!
//! - [`classify`] / [`reify`]: semantic type names and their inverse
//! - [`resolve`]: field to flag correlation
//! - [`RootBlockRegistry`]: section types documented as standalone blocks
//! - [`Extractor`]: the tree walker assembling the model

mod classify;
mod correlate;
mod error;
mod model;
mod prefix;
mod roots;
mod walker;

#[cfg(test)]
mod tests;

pub use classify::{classify, reifiable_types, reify, try_reify};
pub use correlate::{SpecialType, resolve};
pub use error::{ExtractError, UnsupportedTypeError};
pub use model::{BlockEntry, ConfigBlock, ConfigEntry, FieldEntry, FieldExample};
pub use prefix::find_flags_prefix;
pub use roots::{RootBlock, RootBlockRegistry};
pub use walker::Extractor;
