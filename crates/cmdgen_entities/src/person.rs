//! Person names and gestures.

use std::fmt;
use std::str::FromStr;

use cmdgen_foundation::{Queryable, Value};

/// Grammatical gender of a person name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Gender {
    /// Lowercase name, which doubles as the wildcard keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("unknown gender `{other}`")),
        }
    }
}

/// A first name a person in the arena may have.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonName {
    name: String,
    gender: Gender,
}

impl PersonName {
    /// Creates a name.
    #[must_use]
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
        }
    }

    /// The name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Its gender.
    #[must_use]
    pub fn gender(&self) -> Gender {
        self.gender
    }
}

impl Queryable for PersonName {
    fn name(&self) -> &str {
        &self.name
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Value::from(self.name.as_str())),
            "gender" => Some(Value::from(self.gender.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A gesture a person can perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gesture {
    name: String,
}

impl Gesture {
    /// Creates a gesture.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The gesture description.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Queryable for Gesture {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
