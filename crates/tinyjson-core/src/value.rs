//! The JSON value tree.
//!
//! [`Value`] is a closed enum over the seven JSON shapes this crate models.
//! Integers and doubles are separate variants: a lexeme with `.`, `e` or `E`
//! is a [`Value::Double`], anything else that fits in 32 bits is a
//! [`Value::Int`]. Accessors never convert between the two.
//!
//! # Promotion
//!
//! A [`Value::Null`] turns into an empty object on the first keyed write
//! ([`Value::field_mut`], `value["key"] = ...`) and into an empty array on
//! the first [`Value::push_back`]. Only `Null` is promoted; every other tag
//! mismatch is a [`JsonError::InvalidType`].
//!
//! ```
//! use tinyjson_core::Value;
//!
//! let mut employee = Value::new();
//! employee["name"] = "John Doe".into();
//! employee["age"] = 30.into();
//! assert_eq!(employee.len().unwrap(), 2);
//! assert!(employee.push_back("oops").is_err());
//! ```

use crate::error::{JsonError, Result};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Array payload: ordered, index-addressable.
pub type Array = Vec<Value>;

/// Object payload. Keys are unique and iterate in sorted order.
pub type Object = BTreeMap<String, Value>;

/// Shared `Null` returned by read-only lookups of missing keys.
static NULL: Value = Value::Null;

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Int,
    Bool,
    Double,
    String,
    Array,
    Object,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Null => "null",
            ValueType::Int => "int",
            ValueType::Bool => "bool",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JSON document node. Owns all of its descendants.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i32),
    Bool(bool),
    Double(f64),
    String(String),
    Array(Array),
    Object(Object),
}

mod private {
    pub trait Sealed {}
}

/// Payload types that [`Value::get`] can hand out.
///
/// Implemented for `()`, `i32`, `bool`, `f64`, `String`, [`Array`] and
/// [`Object`]; sealed because the set of JSON shapes is closed.
pub trait Payload: private::Sealed {
    /// The tag a value must carry to yield this payload.
    const TYPE: ValueType;

    fn extract(value: &Value) -> Option<&Self>;
}

macro_rules! payload {
    ($ty:ty, $variant:ident) => {
        impl private::Sealed for $ty {}

        impl Payload for $ty {
            const TYPE: ValueType = ValueType::$variant;

            fn extract(value: &Value) -> Option<&Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

payload!(i32, Int);
payload!(bool, Bool);
payload!(f64, Double);
payload!(String, String);
payload!(Array, Array);
payload!(Object, Object);

impl private::Sealed for () {}

impl Payload for () {
    const TYPE: ValueType = ValueType::Null;

    fn extract(value: &Value) -> Option<&Self> {
        match value {
            Value::Null => Some(&()),
            _ => None,
        }
    }
}

impl Value {
    /// A fresh `Null` value.
    pub fn new() -> Self {
        Value::Null
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Int(_) => ValueType::Int,
            Value::Bool(_) => ValueType::Bool,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Borrow the payload if the tag matches `T`.
    ///
    /// ```
    /// use tinyjson_core::{JsonError, Value, ValueType};
    ///
    /// let v = Value::from(1.5);
    /// assert_eq!(*v.get::<f64>().unwrap(), 1.5);
    /// assert_eq!(
    ///     v.get::<i32>(),
    ///     Err(JsonError::InvalidType { expected: ValueType::Int, found: ValueType::Double })
    /// );
    /// ```
    pub fn get<T: Payload>(&self) -> Result<&T> {
        T::extract(self).ok_or_else(|| self.mismatch(T::TYPE))
    }

    pub fn as_int(&self) -> Result<i32> {
        self.get::<i32>().copied()
    }

    pub fn as_double(&self) -> Result<f64> {
        self.get::<f64>().copied()
    }

    pub fn as_bool(&self) -> Result<bool> {
        self.get::<bool>().copied()
    }

    pub fn as_str(&self) -> Result<&str> {
        self.get::<String>().map(String::as_str)
    }

    pub fn as_array(&self) -> Result<&Array> {
        self.get::<Array>()
    }

    pub fn as_object(&self) -> Result<&Object> {
        self.get::<Object>()
    }

    pub fn as_string_mut(&mut self) -> Result<&mut String> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueType::String)),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }

    /// Look up `key` without mutating.
    ///
    /// A missing key, or a `Null` receiver, yields a shared `Null`. Any
    /// other non-object receiver is [`JsonError::InvalidType`].
    pub fn field(&self, key: &str) -> Result<&Value> {
        match self {
            Value::Object(map) => Ok(map.get(key).unwrap_or(&NULL)),
            Value::Null => Ok(&NULL),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }

    /// Mutable slot for `key`, inserting `Null` when the key is absent.
    ///
    /// A `Null` receiver is promoted to an empty object first.
    pub fn field_mut(&mut self, key: &str) -> Result<&mut Value> {
        if self.is_null() {
            *self = Value::Object(Object::new());
        }
        match self {
            Value::Object(map) => Ok(map.entry(key.to_owned()).or_default()),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }

    /// Element at `index`. The receiver must already be an array.
    pub fn at(&self, index: usize) -> Result<&Value> {
        match self {
            Value::Array(items) => items.get(index).ok_or(JsonError::IndexOutOfRange {
                index,
                len: items.len(),
            }),
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    /// Mutable element at `index`. There is no promotion on this path:
    /// indexing a `Null` by position is [`JsonError::InvalidType`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value> {
        match self {
            Value::Array(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or(JsonError::IndexOutOfRange { index, len })
            }
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    /// Append to an array, promoting a `Null` receiver to an empty array.
    pub fn push_back(&mut self, value: impl Into<Value>) -> Result<()> {
        if self.is_null() {
            *self = Value::Array(Array::new());
        }
        match self {
            Value::Array(items) => {
                items.push(value.into());
                Ok(())
            }
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    /// Element count of an array or key count of an object.
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Array(items) => Ok(items.len()),
            Value::Object(map) => Ok(map.len()),
            other => Err(other.mismatch(ValueType::Array)),
        }
    }

    /// True for an empty array or object. Unlike [`Value::len`] this never
    /// fails: every other tag, `Null` included, reports `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    /// True only for an object that contains `key`.
    pub fn is_member(&self, key: &str) -> bool {
        match self {
            Value::Object(map) => map.contains_key(key),
            _ => false,
        }
    }

    /// Move the value out, leaving `Null` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    fn mismatch(&self, expected: ValueType) -> JsonError {
        JsonError::InvalidType {
            expected,
            found: self.value_type(),
        }
    }
}

// ── Subscript sugar ─────────────────────────────────────────────────────
//
// These panic where the `field`/`at` family returns an error, the same way
// `Vec` and `HashMap` indexing does.

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.field(key)
            .unwrap_or_else(|err| panic!("cannot index with key {key:?}: {err}"))
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.field_mut(key)
            .unwrap_or_else(|err| panic!("cannot index with key {key:?}: {err}"))
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.at(index)
            .unwrap_or_else(|err| panic!("cannot index with {index}: {err}"))
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.at_mut(index)
            .unwrap_or_else(|err| panic!("cannot index with {index}: {err}"))
    }
}

// ── Construction ────────────────────────────────────────────────────────

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

// ── Conversion out ──────────────────────────────────────────────────────
//
// `let s: String = (&doc["name"]).try_into()?;` reads a slot as a
// primitive. Fails exactly like the matching `as_*` accessor.

impl TryFrom<&Value> for i32 {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_int()
    }
}

impl TryFrom<&Value> for f64 {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_double()
    }
}

impl TryFrom<&Value> for bool {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_bool()
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = JsonError;

    fn try_from(value: &'a Value) -> Result<Self> {
        value.as_str()
    }
}

impl TryFrom<&Value> for String {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl TryFrom<&Value> for Array {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_array().cloned()
    }
}

impl TryFrom<&Value> for Object {
    type Error = JsonError;

    fn try_from(value: &Value) -> Result<Self> {
        value.as_object().cloned()
    }
}

impl TryFrom<Value> for String {
    type Error = JsonError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueType::String)),
        }
    }
}

impl TryFrom<Value> for Array {
    type Error = JsonError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(other.mismatch(ValueType::Array)),
        }
    }
}

impl TryFrom<Value> for Object {
    type Error = JsonError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }
}

// ── Equality against primitives ─────────────────────────────────────────
//
// True only when the tag matches the primitive's JSON type. `Int(1)` is
// not equal to `1.0`.

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Double(f) if f == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::String(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        *self == *other.as_str()
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for f64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

// ── serde ───────────────────────────────────────────────────────────────

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int(n) => serializer.serialize_i32(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Double(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}
