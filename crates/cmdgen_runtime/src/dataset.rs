//! Dataset export.
//!
//! A dataset is a list of `{ id, sentence, remarks, command }` records, built
//! either from random bound tasks or from every tree the grammar can produce,
//! and written as a pretty-printed JSON array or as MessagePack.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use cmdgen_engine::{Task, TaskGenerator};
use cmdgen_foundation::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// =============================================================================
// Format
// =============================================================================

/// Serialization format of an exported dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// MessagePack with named fields.
    MessagePack,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::MessagePack => "msgpack",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "msgpack" | "messagepack" | "mp" => Ok(Self::MessagePack),
            other => Err(format!("unknown output format `{other}` (expected json or msgpack)")),
        }
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// One exported task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetElement {
    /// Position in the dataset, starting at 1.
    pub id: usize,
    /// The task sentence.
    pub sentence: String,
    /// Remarks as one block of text, empty when there are none.
    pub remarks: String,
    /// The rendered command, if any.
    pub command: Option<String>,
    /// Why the command failed to render, when the grammar defines one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_error: Option<String>,
}

impl DatasetElement {
    fn from_task(id: usize, task: &Task) -> Self {
        Self {
            id,
            sentence: task.sentence().to_string(),
            remarks: task.remarks_text(),
            command: task.command().map(str::to_string),
            command_error: task.command_error().map(ToString::to_string),
        }
    }
}

/// An ordered collection of exported tasks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    elements: Vec<DatasetElement>,
}

impl Dataset {
    /// Generates `count` random bound tasks.
    ///
    /// # Errors
    /// Returns the first generation error that survives the generator's
    /// retries.
    pub fn random(generator: &mut TaskGenerator, count: usize) -> Result<Self> {
        let mut elements = Vec::with_capacity(count);
        for id in 1..=count {
            let task = generator.generate()?;
            elements.push(DatasetElement::from_task(id, &task));
        }
        info!(count, "random dataset generated");
        Ok(Self { elements })
    }

    /// Every tree the grammar can produce, unbound, up to `limit` elements.
    /// Trees that render to an empty sentence are skipped.
    ///
    /// # Errors
    /// Returns unknown-non-terminal if the start symbol has no rules.
    pub fn exhaustive(generator: &TaskGenerator, limit: Option<usize>) -> Result<Self> {
        let tasks = generator
            .enumerate_all()?
            .map(Task::new)
            .filter(|task| !task.sentence().trim().is_empty());
        let elements: Vec<_> = tasks
            .take(limit.unwrap_or(usize::MAX))
            .enumerate()
            .map(|(i, task)| DatasetElement::from_task(i + 1, &task))
            .collect();
        info!(count = elements.len(), "exhaustive dataset enumerated");
        Ok(Self { elements })
    }

    /// The elements, in id order.
    #[must_use]
    pub fn elements(&self) -> &[DatasetElement] {
        &self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the dataset has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serializes to a pretty-printed JSON array.
    ///
    /// # Errors
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::serialization(format!("failed to encode dataset: {e}")))
    }

    /// Serializes to MessagePack.
    ///
    /// # Errors
    /// Returns a serialization error if encoding fails.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self).map_err(|e| Error::serialization(format!("failed to encode dataset: {e}")))
    }

    /// Parses a JSON dataset.
    ///
    /// # Errors
    /// Returns a serialization error if the text is not a dataset.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::serialization(format!("failed to decode dataset: {e}")))
    }

    /// Parses a MessagePack dataset.
    ///
    /// # Errors
    /// Returns a serialization error if the bytes are not a dataset.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(format!("failed to decode dataset: {e}")))
    }

    /// Writes the dataset in `format`.
    ///
    /// # Errors
    /// Returns a serialization or i/o error.
    pub fn write_to(&self, mut writer: impl Write, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => {
                writer.write_all(self.to_json()?.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            OutputFormat::MessagePack => writer.write_all(&self.to_msgpack()?)?,
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes the dataset to a file.
    ///
    /// # Errors
    /// Returns an i/o error if the file cannot be created, or any error
    /// from [`write_to`](Self::write_to).
    pub fn save(&self, path: &Path, format: OutputFormat) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| Error::io(format!("failed to create {}: {e}", path.display())))?;
        self.write_to(BufWriter::new(file), format)?;
        debug!(path = %path.display(), %format, elements = self.len(), "dataset saved");
        Ok(())
    }
}

impl FromIterator<DatasetElement> for Dataset {
    fn from_iter<I: IntoIterator<Item = DatasetElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}
