//! Documentation model produced by extraction.
//!
//! Blocks own their entries in declaration order. Block entries share their
//! block through an `Arc`, so every occurrence of a promoted root block points
//! at the same instance.

use std::{collections::BTreeSet, sync::Arc};

use serde::{Serialize, Serializer, ser::SerializeStruct};
use serde_json::Value;

use crate::schema::Category;

/// One documentable section: the top-level tree or a promoted root block.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigBlock {
    /// Block name; empty for the top-level block.
    pub name: String,
    /// Block description.
    pub description: String,
    /// Entries in declaration order.
    pub entries: Vec<ConfigEntry>,
    /// Flag-name prefixes under which a recurring root block is mounted.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub flag_prefixes: BTreeSet<String>,
}

impl ConfigBlock {
    /// Creates an empty block.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Appends an entry.
    pub fn add(&mut self, entry: ConfigEntry) {
        self.entries.push(entry);
    }

    /// Entry named `name`.
    pub fn entry(&self, name: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Field entries, in order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            ConfigEntry::Field(field) => Some(field),
            ConfigEntry::Block(_) => None,
        })
    }

    /// Block entries, in order.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            ConfigEntry::Block(block) => Some(block),
            ConfigEntry::Field(_) => None,
        })
    }
}

/// A nested section or a leaf setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigEntry {
    /// Nested section.
    Block(BlockEntry),
    /// Leaf setting.
    Field(FieldEntry),
}

impl ConfigEntry {
    /// Documented name of the entry.
    pub fn name(&self) -> &str {
        match self {
            ConfigEntry::Block(block) => &block.name,
            ConfigEntry::Field(field) => &field.name,
        }
    }

    /// Whether the entry must be set explicitly.
    pub fn required(&self) -> bool {
        match self {
            ConfigEntry::Block(block) => block.required,
            ConfigEntry::Field(field) => field.required,
        }
    }

    /// The nested block entry, if this is one.
    pub fn as_block(&self) -> Option<&BlockEntry> {
        match self {
            ConfigEntry::Block(block) => Some(block),
            ConfigEntry::Field(_) => None,
        }
    }

    /// The field entry, if this is one.
    pub fn as_field(&self) -> Option<&FieldEntry> {
        match self {
            ConfigEntry::Field(field) => Some(field),
            ConfigEntry::Block(_) => None,
        }
    }
}

/// Nested section reference.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntry {
    /// Documented field name.
    pub name: String,
    /// Whether the section must be set explicitly.
    pub required: bool,
    /// The nested block.
    pub block: Arc<ConfigBlock>,
    /// Whether the block is a promoted root block documented on its own.
    pub root: bool,
}

impl Serialize for BlockEntry {
    /// Root blocks are listed on their own, so a root entry serializes the
    /// block name instead of the block.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BlockEntry", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("required", &self.required)?;
        state.serialize_field("root", &self.root)?;
        if self.root {
            state.serialize_field("block", &self.block.name)?;
        } else {
            state.serialize_field("block", self.block.as_ref())?;
        }
        state.end()
    }
}

/// Leaf setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEntry {
    /// Documented field name.
    pub name: String,
    /// Whether the field must be set explicitly.
    pub required: bool,
    /// Command-line flag setting the field, when it is reachable from the CLI.
    pub flag: Option<String>,
    /// Field description.
    pub description: String,
    /// Semantic type, e.g. `duration` or `list of string`.
    pub semantic_type: String,
    /// Textual default.
    pub default: Option<String>,
    /// Sample snippet keyed by the field name.
    pub example: Option<FieldExample>,
    /// Audience of the field.
    pub category: Category,
}

impl FieldEntry {
    /// Description prefixed with the category unless it is basic.
    pub fn described(&self) -> String {
        match self.category {
            Category::Basic => self.description.clone(),
            category => format!("({category}) {}", self.description),
        }
    }
}

/// Documented sample for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldExample {
    /// Explanation shown alongside the sample.
    pub comment: String,
    /// Sample, as `{ <field name>: <value> }`.
    pub value: Value,
}
