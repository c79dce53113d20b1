use crate::schema::{Describe, TypeInfo};

/// Section type documented as an independent top-level block wherever it
/// appears.
#[derive(Debug, Clone)]
pub struct RootBlock {
    ty: TypeInfo,
    name: String,
    description: String,
}

impl RootBlock {
    /// Promotes section type `T` under `name`.
    pub fn of<T: Describe>(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            ty: TypeInfo::of::<T>(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Promoted section type.
    pub fn type_info(&self) -> &TypeInfo {
        &self.ty
    }

    /// Block name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Block description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Fixed set of root block types, queried by type identity.
///
/// The set is supplied once at construction and cannot be changed afterwards.
#[derive(Debug, Clone, Default)]
pub struct RootBlockRegistry {
    blocks: Vec<RootBlock>,
}

impl RootBlockRegistry {
    /// Creates a registry; for a type listed twice the first entry wins.
    pub fn new(blocks: impl IntoIterator<Item = RootBlock>) -> Self {
        let mut unique: Vec<RootBlock> = Vec::new();
        for block in blocks {
            if !unique.iter().any(|known| known.ty == block.ty) {
                unique.push(block);
            }
        }
        Self { blocks: unique }
    }

    /// Root block registered for `ty`.
    pub fn is_root(&self, ty: &TypeInfo) -> Option<&RootBlock> {
        self.blocks.iter().find(|block| block.ty == *ty)
    }

    /// Registered root blocks, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RootBlock> {
        self.blocks.iter()
    }

    /// Number of registered root blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no root block is registered.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
