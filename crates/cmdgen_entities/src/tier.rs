//! Difficulty degrees for grammars and predefined questions.

use std::fmt;
use std::str::FromStr;

/// How hard a task or question is to understand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DifficultyDegree {
    /// Not stated.
    #[default]
    Unknown,
    /// Easy.
    Easy,
    /// Moderate.
    Moderate,
    /// High.
    High,
}

impl DifficultyDegree {
    /// All stated degrees, easiest first.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Moderate, Self::High];

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Easy => "easy",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for DifficultyDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyDegree {
    type Err = String;

    /// Accepts the names case-insensitively, or the numbers 1 to 3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" | "0" => Ok(Self::Unknown),
            "easy" | "1" => Ok(Self::Easy),
            "moderate" | "2" => Ok(Self::Moderate),
            "high" | "3" => Ok(Self::High),
            other => Err(format!("unknown difficulty degree `{other}`")),
        }
    }
}
