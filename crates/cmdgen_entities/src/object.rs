//! Objects and object categories.

use std::fmt;
use std::str::FromStr;

use cmdgen_foundation::{PropertyBag, Queryable, Value};

/// How an object is presented to the robot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObjectKind {
    /// Known in advance.
    #[default]
    Known,
    /// Similar-looking to a known object.
    Alike,
    /// Special-purpose object.
    Special,
}

impl ObjectKind {
    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Known => "known",
            Self::Alike => "alike",
            Self::Special => "special",
        }
    }

    /// Maps a wildcard keyword (`kobject`, `aobject`, `sobject`) to a kind.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "kobject" => Some(Self::Known),
            "aobject" => Some(Self::Alike),
            "sobject" => Some(Self::Special),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "known" => Ok(Self::Known),
            "alike" => Ok(Self::Alike),
            "special" => Ok(Self::Special),
            other => Err(format!("unknown object kind `{other}`")),
        }
    }
}

/// Where objects of a category are usually found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultLocation {
    /// Placement name.
    pub location: String,
    /// Room containing the placement.
    pub room: String,
}

/// A named group of objects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    name: String,
    default_location: Option<DefaultLocation>,
}

impl Category {
    /// Creates a category with no default location.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_location: None,
        }
    }

    /// Sets the default location.
    #[must_use]
    pub fn with_default_location(mut self, location: impl Into<String>, room: impl Into<String>) -> Self {
        self.default_location = Some(DefaultLocation {
            location: location.into(),
            room: room.into(),
        });
        self
    }

    /// Category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the category's objects are usually kept.
    #[must_use]
    pub fn default_location(&self) -> Option<&DefaultLocation> {
        self.default_location.as_ref()
    }
}

impl Queryable for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Value::from(self.name.as_str())),
            "location" | "defaultlocation" => self
                .default_location
                .as_ref()
                .map(|d| Value::named(d.location.as_str())),
            "room" => self
                .default_location
                .as_ref()
                .map(|d| Value::named(d.room.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A graspable object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Object {
    name: String,
    category: String,
    kind: ObjectKind,
    properties: PropertyBag,
}

impl Object {
    /// Creates a known object in the given category.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            kind: ObjectKind::Known,
            properties: PropertyBag::new(),
        }
    }

    /// Sets the kind.
    #[must_use]
    pub fn with_kind(mut self, kind: ObjectKind) -> Self {
        self.kind = kind;
        self
    }

    /// Adds a free-form property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<std::sync::Arc<str>>) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Replaces all free-form properties.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.properties = properties;
        self
    }

    /// Object name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the owning category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Object kind.
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }
}

impl Queryable for Object {
    fn name(&self) -> &str {
        &self.name
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Value::from(self.name.as_str())),
            "category" => Some(Value::named(self.category.as_str())),
            "type" | "kind" => Some(Value::from(self.kind.as_str())),
            _ => None,
        }
    }

    fn properties(&self) -> Option<&PropertyBag> {
        Some(&self.properties)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
