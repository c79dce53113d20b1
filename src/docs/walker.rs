use std::{
    any::TypeId,
    collections::{BTreeSet, HashMap, HashSet},
    mem,
    sync::Arc,
};

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::{
    flags::{FlagInfo, FlagKey, FlagRegistry, RegisterFlags},
    schema::{
        Category, CategoryOverrides, Describe, DocAnnotation, FieldDescriptor, Shape, TypeInfo,
    },
};

use super::{
    BlockEntry, ConfigBlock, ConfigEntry, ExtractError, FieldEntry, FieldExample,
    RootBlockRegistry, classify,
    correlate::{self, SpecialType},
    find_flags_prefix,
};

/// Fields kept only so old configuration files still parse.
const UNUSED_FLAG_PREFIX: &str = "unused_flag";

type BlockId = usize;
type FieldsFn = fn() -> Vec<FieldDescriptor>;

/// Builds the documentation model of a configuration tree.
///
/// The first returned block is the fully expanded tree of the documented
/// type. Every promoted root block found anywhere below it follows, once,
/// in discovery order.
///
/// # Example
///
/// ```
/// use confdoc::{
///     docs::{Extractor, RootBlockRegistry},
///     flags::FlagRegistry,
///     schema::{Describe, FieldDescriptor, Shape, TypeInfo},
/// };
///
/// struct Limits;
///
/// impl Describe for Limits {
///     fn shape() -> Shape {
///         Shape::Section(|| vec![FieldDescriptor::of::<u64>("max_series")])
///     }
/// }
///
/// let roots = RootBlockRegistry::default();
/// let blocks = Extractor::new(&roots)
///     .extract(&TypeInfo::of::<Limits>(), &FlagRegistry::default())
///     .unwrap();
///
/// assert_eq!(blocks[0].entries[0].name(), "max_series");
/// ```
pub struct Extractor<'a> {
    roots: &'a RootBlockRegistry,
    categories: Option<&'a CategoryOverrides>,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor promoting the types of `roots`.
    pub fn new(roots: &'a RootBlockRegistry) -> Self {
        Self {
            roots,
            categories: None,
        }
    }

    /// Consults `categories`, keyed by flag name, before declared categories.
    pub fn with_category_overrides(mut self, categories: &'a CategoryOverrides) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Documents `T`, correlating against the flags a fresh `T::default()`
    /// registers.
    ///
    /// Values held by the caller never become documented defaults; pass a
    /// registry to [`Extractor::extract`] to document other values.
    ///
    /// # Errors
    ///
    /// See [`Extractor::extract`].
    pub fn extract_config<T: Describe + RegisterFlags + Default>(
        &self,
    ) -> Result<Vec<Arc<ConfigBlock>>, ExtractError> {
        let flags = FlagRegistry::collect::<T>();
        self.extract(&TypeInfo::of::<T>(), &flags)
    }

    /// Documents section type `root` against `flags`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Shape` if `root` is not a section,
    /// `ExtractError::Type` if a field type cannot be classified,
    /// `ExtractError::Recursive` if a section contains itself and
    /// `ExtractError::DuplicateEntry` if two siblings share a name.
    #[instrument(skip_all, fields(root = root.name()))]
    pub fn extract(
        &self,
        root: &TypeInfo,
        flags: &FlagRegistry,
    ) -> Result<Vec<Arc<ConfigBlock>>, ExtractError> {
        let mut walk = Walk::new(self, flags);
        let top = walk.reserve();
        walk.output.push(top);

        let mut block = Draft::default();
        walk.walk_root(&mut block, root)?;
        walk.drafts[top] = block;

        let blocks = walk.finish();
        debug!(blocks = blocks.len(), "Extracted configuration documentation");
        Ok(blocks)
    }

    /// Documents section type `root` into the existing `block`.
    ///
    /// Entries are appended to `block`; the returned list holds only the
    /// promoted root blocks discovered below it.
    ///
    /// # Errors
    ///
    /// See [`Extractor::extract`]. On error `block` is left untouched.
    #[instrument(skip_all, fields(root = root.name(), block = %block.name))]
    pub fn extract_into(
        &self,
        block: &mut ConfigBlock,
        root: &TypeInfo,
        flags: &FlagRegistry,
    ) -> Result<Vec<Arc<ConfigBlock>>, ExtractError> {
        let mut walk = Walk::new(self, flags);

        let mut draft = Draft::default();
        draft.names = block
            .entries
            .iter()
            .map(|entry| entry.name().to_string())
            .collect();
        walk.walk_root(&mut draft, root)?;

        let (entries, blocks) = walk.finish_into(draft);
        block.entries.extend(entries);
        debug!(blocks = blocks.len(), "Extracted configuration documentation");
        Ok(blocks)
    }
}

#[derive(Default)]
struct Draft {
    name: String,
    description: String,
    entries: Vec<DraftEntry>,
    names: HashSet<String>,
    flag_prefixes: BTreeSet<String>,
}

impl Draft {
    fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    fn add(
        &mut self,
        entry: DraftEntry,
        section: &TypeInfo,
        path: &str,
    ) -> Result<(), ExtractError> {
        if !self.names.insert(entry.name().to_string()) {
            return Err(ExtractError::DuplicateEntry {
                path: path.to_string(),
                section: section.name(),
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    fn first_flag(&self) -> Option<&str> {
        self.entries.iter().find_map(|entry| match entry {
            DraftEntry::Field(field) => field.flag.as_deref(),
            DraftEntry::Block { .. } => None,
        })
    }
}

enum DraftEntry {
    Block {
        name: String,
        required: bool,
        id: BlockId,
        root: bool,
    },
    Field(FieldEntry),
}

impl DraftEntry {
    fn name(&self) -> &str {
        match self {
            DraftEntry::Block { name, .. } => name,
            DraftEntry::Field(field) => &field.name,
        }
    }
}

struct Promotion {
    id: BlockId,
    occurrence_flags: Vec<String>,
}

/// Mutable state of one extraction run.
struct Walk<'w> {
    roots: &'w RootBlockRegistry,
    categories: Option<&'w CategoryOverrides>,
    flags: &'w FlagRegistry,
    drafts: Vec<Draft>,
    output: Vec<BlockId>,
    promoted: HashMap<TypeId, Promotion>,
    sections: Vec<TypeId>,
}

impl<'w> Walk<'w> {
    fn new(extractor: &Extractor<'w>, flags: &'w FlagRegistry) -> Self {
        Self {
            roots: extractor.roots,
            categories: extractor.categories,
            flags,
            drafts: Vec::new(),
            output: Vec::new(),
            promoted: HashMap::new(),
            sections: Vec::new(),
        }
    }

    fn reserve(&mut self) -> BlockId {
        self.drafts.push(Draft::default());
        self.drafts.len() - 1
    }

    fn walk_root(&mut self, block: &mut Draft, root: &TypeInfo) -> Result<(), ExtractError> {
        let shape = root.shape();
        let Shape::Section(fields) = shape else {
            return Err(ExtractError::Shape {
                path: String::new(),
                type_name: root.name(),
                kind: shape.kind(),
            });
        };

        self.walk_section(block, root, fields, &FlagKey::root(), "")
    }

    fn walk_section(
        &mut self,
        block: &mut Draft,
        section: &TypeInfo,
        fields: FieldsFn,
        key: &FlagKey,
        path: &str,
    ) -> Result<(), ExtractError> {
        if self.sections.contains(&section.id()) {
            return Err(ExtractError::Recursive {
                path: path.to_string(),
                type_name: section.name(),
            });
        }

        self.sections.push(section.id());
        for field in fields() {
            self.walk_field(block, section, &field, key, path)?;
        }
        self.sections.pop();

        Ok(())
    }

    fn walk_field(
        &mut self,
        block: &mut Draft,
        section: &TypeInfo,
        field: &FieldDescriptor,
        key: &FlagKey,
        path: &str,
    ) -> Result<(), ExtractError> {
        let field_path = join_path(path, field.name().unwrap_or(field.ident()));
        let annotation = DocAnnotation::parse(field.annotation());
        if !annotation.malformed().is_empty() {
            warn!(
                field = %field_path,
                annotation = field.annotation(),
                tokens = ?annotation.malformed(),
                "Skipping doc annotation tokens without a key"
            );
        }

        if annotation.is_hidden() {
            return Ok(());
        }

        let name = field.name();
        if name.is_none() && !field.is_inline() {
            return Ok(());
        }

        let ty = field.type_info();
        let shape = ty.shape();
        if matches!(shape, Shape::Callback) || field.ident().starts_with(UNUSED_FLAG_PREFIX) {
            return Ok(());
        }

        let field_key = key.child(field.ident());

        if let Shape::Section(fields) = shape {
            return match name {
                Some(name) => self.walk_nested(
                    block,
                    section,
                    Nested {
                        name,
                        ty,
                        fields,
                        required: annotation.is_required(),
                        description: annotation.description().unwrap_or_default(),
                    },
                    &field_key,
                    &field_path,
                ),
                None => self.walk_section(block, ty, fields, &field_key, path),
            };
        }

        // Inline leaves have nowhere to be documented.
        let Some(name) = name else {
            return Ok(());
        };

        let flag = correlate::resolve(&field_key, &annotation, self.flags);
        let special = SpecialType::of(&shape);
        let semantic_type = match special {
            Some(special) => special.semantic_type().to_string(),
            None => classify(ty).map_err(|source| ExtractError::Type {
                path: field_path.clone(),
                section: section.name(),
                source,
            })?,
        };

        let entry = FieldEntry {
            name: name.to_string(),
            required: annotation.is_required(),
            flag: flag.map(|flag| flag.name.clone()),
            description: describe(&annotation, flag),
            semantic_type,
            default: annotation
                .default_value()
                .map(str::to_string)
                .or_else(|| flag.map(|flag| flag.default_value.clone())),
            example: special
                .is_none()
                .then(|| ty.example())
                .flatten()
                .map(|example| FieldExample {
                    comment: example.comment,
                    value: keyed(name, example.value),
                }),
            category: self.category(field, flag),
        };

        block.add(DraftEntry::Field(entry), section, &field_path)
    }

    fn walk_nested(
        &mut self,
        block: &mut Draft,
        section: &TypeInfo,
        nested: Nested<'_>,
        key: &FlagKey,
        path: &str,
    ) -> Result<(), ExtractError> {
        let Nested {
            name,
            ty,
            fields,
            required,
            description,
        } = nested;

        let roots = self.roots;
        let Some(root) = roots.is_root(ty) else {
            let mut child = Draft::new(name, description);
            self.walk_section(&mut child, ty, fields, key, path)?;
            self.drafts.push(child);
            let id = self.drafts.len() - 1;

            let entry = DraftEntry::Block {
                name: name.to_string(),
                required,
                id,
                root: false,
            };
            return block.add(entry, section, path);
        };

        let id = match self.promoted.get(&ty.id()).map(|promotion| promotion.id) {
            Some(id) => {
                let mut occurrence = Draft::default();
                self.walk_section(&mut occurrence, ty, fields, key, path)?;
                self.record_occurrence(ty, &occurrence);
                id
            }
            None => {
                debug!(block = root.name(), path, "Promoting root block");
                let id = self.reserve();
                self.output.push(id);
                self.promoted.insert(
                    ty.id(),
                    Promotion {
                        id,
                        occurrence_flags: Vec::new(),
                    },
                );

                let mut child = Draft::new(root.name(), root.description());
                self.walk_section(&mut child, ty, fields, key, path)?;
                self.record_occurrence(ty, &child);
                self.drafts[id] = child;
                id
            }
        };

        let entry = DraftEntry::Block {
            name: name.to_string(),
            required,
            id,
            root: true,
        };
        block.add(entry, section, path)
    }

    fn record_occurrence(&mut self, ty: &TypeInfo, occurrence: &Draft) {
        let Some(flag) = occurrence.first_flag() else {
            return;
        };
        if let Some(promotion) = self.promoted.get_mut(&ty.id()) {
            promotion.occurrence_flags.push(flag.to_string());
        }
    }

    fn category(&self, field: &FieldDescriptor, flag: Option<&FlagInfo>) -> Category {
        flag.and_then(|flag| self.categories.and_then(|overrides| overrides.get(&flag.name)))
            .or(field.declared_category())
            .unwrap_or_default()
    }

    fn annotate_prefixes(&mut self) {
        for promotion in self.promoted.values() {
            let prefixes = find_flags_prefix(&promotion.occurrence_flags);
            self.drafts[promotion.id]
                .flag_prefixes
                .extend(prefixes.into_iter().filter(|prefix| !prefix.is_empty()));
        }
    }

    fn finish(mut self) -> Vec<Arc<ConfigBlock>> {
        self.annotate_prefixes();

        let mut frozen = HashMap::new();
        mem::take(&mut self.output)
            .into_iter()
            .map(|id| self.freeze(id, &mut frozen))
            .collect()
    }

    fn finish_into(mut self, draft: Draft) -> (Vec<ConfigEntry>, Vec<Arc<ConfigBlock>>) {
        self.annotate_prefixes();

        let mut frozen = HashMap::new();
        let block = self.freeze_draft(draft, &mut frozen);
        let blocks = mem::take(&mut self.output)
            .into_iter()
            .map(|id| self.freeze(id, &mut frozen))
            .collect();

        (block.entries, blocks)
    }

    fn freeze(
        &mut self,
        id: BlockId,
        frozen: &mut HashMap<BlockId, Arc<ConfigBlock>>,
    ) -> Arc<ConfigBlock> {
        if let Some(block) = frozen.get(&id) {
            return Arc::clone(block);
        }

        let draft = mem::take(&mut self.drafts[id]);
        let block = Arc::new(self.freeze_draft(draft, frozen));
        frozen.insert(id, Arc::clone(&block));
        block
    }

    fn freeze_draft(
        &mut self,
        draft: Draft,
        frozen: &mut HashMap<BlockId, Arc<ConfigBlock>>,
    ) -> ConfigBlock {
        let entries = draft
            .entries
            .into_iter()
            .map(|entry| match entry {
                DraftEntry::Field(field) => ConfigEntry::Field(field),
                DraftEntry::Block {
                    name,
                    required,
                    id,
                    root,
                } => ConfigEntry::Block(BlockEntry {
                    name,
                    required,
                    block: self.freeze(id, frozen),
                    root,
                }),
            })
            .collect();

        ConfigBlock {
            name: draft.name,
            description: draft.description,
            entries,
            flag_prefixes: draft.flag_prefixes,
        }
    }
}

/// Non-inline section field about to be walked.
struct Nested<'f> {
    name: &'f str,
    ty: &'f TypeInfo,
    fields: FieldsFn,
    required: bool,
    description: &'f str,
}

fn describe(annotation: &DocAnnotation, flag: Option<&FlagInfo>) -> String {
    annotation
        .description()
        .or(flag.map(|flag| flag.usage.as_str()))
        .unwrap_or_default()
        .to_string()
}

fn keyed(name: &str, value: Value) -> Value {
    let mut sample = Map::new();
    sample.insert(name.to_string(), value);
    Value::Object(sample)
}

fn join_path(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}
