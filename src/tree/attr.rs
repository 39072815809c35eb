//! Attribute values and the per-node attribute map.

use std::fmt;

/// The value of an attribute.
///
/// How each variant renders depends on the active
/// [`Convention`](crate::escape::Convention):
///
/// | Value | `Html` | `Xml1` / `Xhtml` |
/// |---|---|---|
/// | `Null` | omitted | omitted |
/// | `Bool(true)` | `key` | `key="key"` |
/// | `Bool(false)` | omitted | `key=""` |
/// | `Text(v)` | `key="v"` | `key="v"` |
/// | `List([a, b])` | `key="a b"` | `key="a b"` |
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttrValue {
    /// No value. Setting an attribute to `Null` removes it.
    #[default]
    Null,
    /// A presence-only (`true`) or explicitly false attribute.
    Bool(bool),
    /// A single string value.
    Text(String),
    /// Several values, joined with single spaces on output (class lists).
    List(Vec<String>),
}

impl AttrValue {
    /// Returns `true` for [`AttrValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the string value of a `Text` attribute.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items of a `List` attribute.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the flag of a `Bool` attribute.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Stringifies the value the way it appears between quotes, unescaped.
///
/// `Null` and `false` are empty, `true` is `"1"`, lists are space-joined.
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Bool(false) => Ok(()),
            Self::Bool(true) => write!(f, "1"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AttrValue {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

macro_rules! attr_value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}

attr_value_from_display!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char);

/// An insertion-ordered attribute map with unique keys.
///
/// Overwriting a key keeps its original position; setting a key to
/// [`AttrValue::Null`] removes it. Serialization follows iteration order.
///
/// # Examples
///
/// ```
/// use markupgen::tree::{AttrValue, Attributes};
///
/// let mut attrs = Attributes::new();
/// attrs.set("id", "main");
/// attrs.set("class", ["a", "b"]);
/// attrs.set("id", "other");
///
/// assert_eq!(attrs.get("id"), Some(&AttrValue::from("other")));
/// assert_eq!(attrs.keys().collect::<Vec<_>>(), ["id", "class"]);
///
/// attrs.set("class", None::<&str>);
/// assert!(!attrs.has("class"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attributes {
    entries: Vec<(String, AttrValue)>,
}

impl Attributes {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Writes `value` under `key`, or removes `key` if the value is `Null`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        if value.is_null() {
            self.remove(&key);
            return;
        }
        match self.position(&key) {
            Some(i) => self.entries[i].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Returns `true` if `key` is set.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns the number of attributes set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no attribute is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every attribute.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        attrs.extend(iter);
        attrs
    }
}

impl<K, V> Extend<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, AttrValue);
    type IntoIter = std::vec::IntoIter<(String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
