//! Runtime value model shared by both merge pipelines.
//!
//! [`Value`] is a closed enum: leaves are stored inline while composite
//! payloads sit behind [`Arc`]. Cloning a value therefore never deep-copies
//! a composite, and [`Value::ptr_eq`] can observe when a merge linked an
//! input into its result instead of copying it. Mutation always goes through
//! [`Arc::make_mut`], so writing into a shared payload copies it first and
//! inputs can never be altered after the fact.

mod convert;
mod key;
mod opaque;
mod record;

use std::hash::{DefaultHasher, Hash, Hasher};
use std::mem;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use serde_json::Number;

pub use convert::{from_value, to_value};
pub use key::{Key, Symbol};
pub use opaque::Opaque;
pub use record::Record;

/// Unique-value collection preserving first-insertion order.
pub type ValueSet = IndexSet<Value>;

/// Key-value collection preserving first-insertion order of keys.
pub type ValueMap = IndexMap<Value, Value>;

/// Any value taking part in a merge.
///
/// Equality is structural: lists compare element-wise, records, sets and maps
/// compare without regard to order, and [`Opaque`] payloads compare by
/// identity.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// No value at all. Filtered out of pure merges by default.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A finite number.
    Number(Number),
    /// A string.
    String(String),
    /// A plain keyed record.
    Record(Arc<Record>),
    /// An ordered list.
    List(Arc<Vec<Value>>),
    /// A set of unique values.
    Set(Arc<ValueSet>),
    /// An associative map with arbitrary value keys.
    Map(Arc<ValueMap>),
    /// An opaque leaf.
    Opaque(Opaque),
}

impl Value {
    /// Wrap `record`.
    #[must_use]
    pub fn record(record: Record) -> Self {
        Self::Record(Arc::new(record))
    }

    /// Build a list from `items`.
    #[must_use]
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build a set from `items`; duplicates collapse onto the first occurrence.
    #[must_use]
    pub fn set<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::Set(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build a map from `entries`; later entries overwrite earlier ones.
    #[must_use]
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Self>,
        V: Into<Self>,
    {
        Self::Map(Arc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Wrap `payload` as an opaque leaf.
    #[must_use]
    pub fn opaque<T: std::any::Any + Send + Sync>(payload: T) -> Self {
        Self::Opaque(Opaque::new(payload))
    }

    /// Returns `true` for [`Value::Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Borrow the record payload.
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Borrow the list payload.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the set payload.
    #[must_use]
    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the map payload.
    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Borrow the string payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the boolean payload.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the number as `i64` when it is an integer in range.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    /// Returns the number as `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    /// Look up `name` when this value is a record.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Self> {
        self.as_record().and_then(|record| record.field(name))
    }

    /// Returns `true` when both values are the same composite allocation or
    /// the same opaque payload.
    ///
    /// Leaves never share an allocation, so this is `false` for them.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b),
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b),
            (Self::Set(a), Self::Set(b)) => Arc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Arc::ptr_eq(a, b),
            (Self::Opaque(a), Self::Opaque(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::List(a), Self::List(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Set(a), Self::Set(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Map(a), Self::Map(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Opaque(a), Self::Opaque(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::Undefined | Self::Null => {}
            Self::Bool(flag) => flag.hash(state),
            Self::Number(number) => number.hash(state),
            Self::String(text) => text.hash(state),
            Self::List(items) => items.hash(state),
            // Unordered composites sum their entry hashes so that equal values
            // hash equally whatever their insertion order.
            Self::Record(record) => unordered_hash(record.len(), record.iter(), state),
            Self::Set(items) => unordered_hash(items.len(), items.iter(), state),
            Self::Map(entries) => unordered_hash(entries.len(), entries.iter(), state),
            Self::Opaque(opaque) => opaque.addr().hash(state),
        }
    }
}

fn unordered_hash<T, H>(len: usize, entries: impl Iterator<Item = T>, state: &mut H)
where
    T: Hash,
    H: Hasher,
{
    let sum = entries.fold(0_u64, |sum, entry| {
        let mut hasher = DefaultHasher::new();
        entry.hash(&mut hasher);
        sum.wrapping_add(hasher.finish())
    });
    len.hash(state);
    sum.hash(state);
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(number.into())
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Number(number.into())
    }
}

impl From<u64> for Value {
    fn from(number: u64) -> Self {
        Self::Number(number.into())
    }
}

impl From<f64> for Value {
    /// Non-finite numbers become [`Value::Null`], matching JSON.
    fn from(number: f64) -> Self {
        Number::from_f64(number).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::record(record)
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(Arc::new(items))
    }
}

impl From<Opaque> for Value {
    fn from(opaque: Opaque) -> Self {
        Self::Opaque(opaque)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    /// `None` becomes [`Value::Undefined`].
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Undefined, Into::into)
    }
}
