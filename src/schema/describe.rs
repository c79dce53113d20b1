use std::{
    any::{self, TypeId},
    collections::{BTreeMap, HashMap},
    fmt,
    sync::mpsc,
    time::Duration,
};

use serde_json::Value;

use super::Category;

/// Sample snippet a type provides for the documentation of fields holding it.
///
/// The comment is rendered above the snippet; the value is placed under the
/// field's documented name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleDoc {
    /// Explanation shown alongside the sample.
    pub comment: String,
    /// Structured sample value.
    pub value: Value,
}

/// Static description of a configurable type.
///
/// Every type that can appear in a documented configuration tree implements
/// this trait. Leaf types report their structural [`Shape`]; sections return
/// [`Shape::Section`] with the ordered list of their field descriptors.
///
/// # Example
///
/// ```
/// use confdoc::schema::{Describe, FieldDescriptor, Shape};
///
/// struct RetryConfig {
///     attempts: u32,
/// }
///
/// impl Describe for RetryConfig {
///     fn shape() -> Shape {
///         Shape::Section(|| {
///             vec![FieldDescriptor::of::<u32>("attempts").doc("description=Retry attempts.")]
///         })
///     }
/// }
/// ```
pub trait Describe: 'static {
    /// Structural shape of the type.
    fn shape() -> Shape;

    /// Optional example attached to every field of this type.
    fn example_doc() -> Option<ExampleDoc> {
        None
    }
}

/// Closed set of shapes a configurable type can take.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// `true` / `false`.
    Boolean,
    /// Any signed or unsigned integer width.
    Int,
    /// Any floating point width.
    Float,
    /// Free text.
    String,
    /// Duration wrapper.
    Duration,
    /// URL wrapper.
    Url,
    /// Secret or credential wrapper.
    Secret,
    /// Point in time wrapper.
    Time,
    /// Type documented under a fixed semantic name regardless of representation.
    Custom(&'static str),
    /// Sequence of the element type.
    List(TypeInfo),
    /// Mapping from key type to value type.
    Map {
        /// Key type.
        key: TypeInfo,
        /// Value type.
        value: TypeInfo,
    },
    /// Compound section; yields its fields in declaration order.
    Section(fn() -> Vec<FieldDescriptor>),
    /// Function or callback value, never configurable.
    Callback,
    /// Shape with no configuration representation (channels, handles).
    Unsupported(&'static str),
}

impl Shape {
    /// Short name of the shape's kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Boolean => "bool",
            Shape::Int => "int",
            Shape::Float => "float",
            Shape::String => "string",
            Shape::Duration => "duration",
            Shape::Url => "url",
            Shape::Secret => "secret",
            Shape::Time => "time",
            Shape::Custom(_) => "custom",
            Shape::List(_) => "list",
            Shape::Map { .. } => "map",
            Shape::Section(_) => "section",
            Shape::Callback => "func",
            Shape::Unsupported(kind) => kind,
        }
    }
}

/// Identity and descriptor functions of a configurable type.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    shape: fn() -> Shape,
    example: fn() -> Option<ExampleDoc>,
}

impl TypeInfo {
    /// Captures the descriptor of `T`.
    pub fn of<T: Describe>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: any::type_name::<T>(),
            shape: T::shape,
            example: T::example_doc,
        }
    }

    /// Type identity used for root block and override lookups.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified Rust type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped, e.g. `HashMap<String, f64>`.
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }

    /// Structural shape of the type.
    pub fn shape(&self) -> Shape {
        (self.shape)()
    }

    /// Example payload, when the type provides one.
    pub fn example(&self) -> Option<ExampleDoc> {
        (self.example)()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeInfo").field(&self.name).finish()
    }
}

/// Strips module paths from a Rust type name, generics included.
///
/// ```
/// use confdoc::schema::short_type_name;
///
/// assert_eq!(
///     short_type_name("std::collections::hash::map::HashMap<alloc::string::String, f64>"),
///     "HashMap<String, f64>"
/// );
/// ```
pub fn short_type_name(full: &str) -> String {
    let mut short = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            short.truncate(segment_start);
            continue;
        }

        short.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = short.len();
        }
    }

    short
}

/// Declaration of a single field inside a section.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    ident: &'static str,
    name: Option<&'static str>,
    inline: bool,
    doc: &'static str,
    category: Option<Category>,
    ty: TypeInfo,
}

impl FieldDescriptor {
    /// Declares field `ident` of type `T`, documented under its identifier.
    pub fn of<T: Describe>(ident: &'static str) -> Self {
        Self {
            ident,
            name: Some(ident),
            inline: false,
            doc: "",
            category: None,
            ty: TypeInfo::of::<T>(),
        }
    }

    /// Documents the field under a different name.
    pub fn renamed(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Marks the field as not externally visible.
    pub fn unnamed(mut self) -> Self {
        self.name = None;
        self
    }

    /// Folds the field's own fields into the parent's namespace.
    pub fn inline(mut self) -> Self {
        self.name = None;
        self.inline = true;
        self
    }

    /// Attaches a pipe-separated doc annotation, e.g. `required|default=30s`.
    pub fn doc(mut self, annotation: &'static str) -> Self {
        self.doc = annotation;
        self
    }

    /// Sets the field's category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Rust identifier of the field.
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Documented name, `None` when the field is not externally visible.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Whether the field is structurally embedded.
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Raw doc annotation.
    pub fn annotation(&self) -> &'static str {
        self.doc
    }

    /// Category declared on the field.
    pub fn declared_category(&self) -> Option<Category> {
        self.category
    }

    /// Descriptor of the field's type.
    pub fn type_info(&self) -> &TypeInfo {
        &self.ty
    }
}

macro_rules! describe_as {
    ($shape:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn shape() -> Shape {
                    $shape
                }
            }
        )+
    };
}

describe_as!(Shape::Boolean => bool);
describe_as!(Shape::Int => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
describe_as!(Shape::Float => f32, f64);
describe_as!(Shape::String => String);
describe_as!(Shape::Duration => Duration);

impl<T: Describe> Describe for Vec<T> {
    fn shape() -> Shape {
        Shape::List(TypeInfo::of::<T>())
    }
}

impl<K: Describe, V: Describe> Describe for HashMap<K, V> {
    fn shape() -> Shape {
        Shape::Map {
            key: TypeInfo::of::<K>(),
            value: TypeInfo::of::<V>(),
        }
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::Map {
            key: TypeInfo::of::<K>(),
            value: TypeInfo::of::<V>(),
        }
    }
}

impl<R: 'static> Describe for fn() -> R {
    fn shape() -> Shape {
        Shape::Callback
    }
}

impl<A: 'static, R: 'static> Describe for fn(A) -> R {
    fn shape() -> Shape {
        Shape::Callback
    }
}

impl<A: 'static, B: 'static, R: 'static> Describe for fn(A, B) -> R {
    fn shape() -> Shape {
        Shape::Callback
    }
}

impl<T: 'static> Describe for mpsc::Sender<T> {
    fn shape() -> Shape {
        Shape::Unsupported("chan")
    }
}

impl<T: 'static> Describe for mpsc::Receiver<T> {
    fn shape() -> Shape {
        Shape::Unsupported("chan")
    }
}
