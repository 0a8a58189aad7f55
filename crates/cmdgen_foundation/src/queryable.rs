//! The capability candidate entities expose to where-clause evaluation.
//!
//! Property lookup first consults an entity's native fields through
//! [`Queryable::property`], then falls back to its string-keyed
//! [`PropertyBag`], parsing the stored text as the type the caller expects.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::value::{Value, ValueType};

/// Free-form string properties attached to an entity.
///
/// Keys are matched case-insensitively. Cloning is O(1).
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")
)]
pub struct PropertyBag(im::OrdMap<Arc<str>, Arc<str>>);

impl PropertyBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdMap::new())
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new bag with the property set.
    #[must_use]
    pub fn with(&self, key: &str, value: impl Into<Arc<str>>) -> Self {
        let mut new = self.0.clone();
        new.insert(key.to_lowercase().into(), value.into());
        Self(new)
    }

    /// Sets a property in place.
    pub fn set(&mut self, key: &str, value: impl Into<Arc<str>>) {
        self.0.insert(key.to_lowercase().into(), value.into());
    }

    /// Gets the raw text of a property.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key.to_lowercase().as_str()).map(AsRef::as_ref)
    }

    /// Gets a property parsed as the given type.
    #[must_use]
    pub fn get_as(&self, key: &str, ty: ValueType) -> Option<Value> {
        self.get(key).and_then(|raw| Value::parse_as(raw, ty))
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }
}

impl fmt::Debug for PropertyBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<str>, V: Into<Arc<str>>> FromIterator<(K, V)> for PropertyBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (k, v) in iter {
            bag.set(k.as_ref(), v);
        }
        bag
    }
}

impl From<BTreeMap<String, String>> for PropertyBag {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<PropertyBag> for BTreeMap<String, String> {
    fn from(bag: PropertyBag) -> Self {
        bag.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }
}

/// Something a where-clause can be evaluated against.
pub trait Queryable {
    /// Display name of the entity.
    fn name(&self) -> &str;

    /// Looks up a native property by case-insensitive name.
    ///
    /// The default implementation knows only `name`.
    fn property(&self, name: &str) -> Option<Value> {
        name.eq_ignore_ascii_case("name")
            .then(|| Value::from(self.name()))
    }

    /// The free-form property bag, if the entity carries one.
    fn properties(&self) -> Option<&PropertyBag> {
        None
    }

    /// Resolves a property: native fields first, then the bag parsed as `ty`.
    fn lookup(&self, name: &str, ty: ValueType) -> Option<Value> {
        self.property(name)
            .or_else(|| self.properties().and_then(|bag| bag.get_as(name, ty)))
    }
}

impl<T: Queryable + ?Sized> Queryable for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }

    fn properties(&self) -> Option<&PropertyBag> {
        (**self).properties()
    }
}

impl<T: Queryable + ?Sized> Queryable for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn property(&self, name: &str) -> Option<Value> {
        (**self).property(name)
    }

    fn properties(&self) -> Option<&PropertyBag> {
        (**self).properties()
    }
}
