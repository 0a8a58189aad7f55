//! Rooms and the specific locations inside them.

use std::fmt;
use std::sync::Arc;

use cmdgen_foundation::{PropertyBag, Queryable, Value};

/// What sort of place a [`Location`] is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationKind {
    /// A whole room.
    Room,
    /// A spot inside a room.
    Specific {
        /// The containing room.
        room: String,
        /// The robot can navigate to it.
        beacon: bool,
        /// Objects can be placed on it.
        placement: bool,
    },
}

/// A named place in the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    name: String,
    kind: LocationKind,
    properties: PropertyBag,
}

impl Location {
    /// Creates a room.
    #[must_use]
    pub fn room(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LocationKind::Room,
            properties: PropertyBag::new(),
        }
    }

    /// Creates a location inside `room` that is neither beacon nor placement.
    #[must_use]
    pub fn specific(name: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LocationKind::Specific {
                room: room.into(),
                beacon: false,
                placement: false,
            },
            properties: PropertyBag::new(),
        }
    }

    /// Marks a specific location as a beacon. No effect on rooms.
    #[must_use]
    pub fn beacon(mut self) -> Self {
        if let LocationKind::Specific { beacon, .. } = &mut self.kind {
            *beacon = true;
        }
        self
    }

    /// Marks a specific location as a placement. No effect on rooms.
    #[must_use]
    pub fn placement(mut self) -> Self {
        if let LocationKind::Specific { placement, .. } = &mut self.kind {
            *placement = true;
        }
        self
    }

    /// Adds a free-form property.
    #[must_use]
    pub fn with_property(mut self, key: &str, value: impl Into<Arc<str>>) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Replaces all free-form properties.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.properties = properties;
        self
    }

    /// Location name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location kind.
    #[must_use]
    pub fn kind(&self) -> &LocationKind {
        &self.kind
    }

    /// The containing room, or the room itself.
    #[must_use]
    pub fn room_name(&self) -> &str {
        match &self.kind {
            LocationKind::Room => &self.name,
            LocationKind::Specific { room, .. } => room,
        }
    }

    /// Returns true for rooms.
    #[must_use]
    pub fn is_room(&self) -> bool {
        matches!(self.kind, LocationKind::Room)
    }

    /// Returns true for beacons.
    #[must_use]
    pub fn is_beacon(&self) -> bool {
        matches!(self.kind, LocationKind::Specific { beacon: true, .. })
    }

    /// Returns true for placements.
    #[must_use]
    pub fn is_placement(&self) -> bool {
        matches!(self.kind, LocationKind::Specific { placement: true, .. })
    }
}

impl Queryable for Location {
    fn name(&self) -> &str {
        &self.name
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(Value::from(self.name.as_str())),
            "room" => Some(Value::named(self.room_name())),
            "isroom" => Some(Value::Bool(self.is_room())),
            "isbeacon" => Some(Value::Bool(self.is_beacon())),
            "isplacement" => Some(Value::Bool(self.is_placement())),
            _ => None,
        }
    }

    fn properties(&self) -> Option<&PropertyBag> {
        Some(&self.properties)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
