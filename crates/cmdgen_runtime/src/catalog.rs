//! Entity catalog files.
//!
//! A catalog file is one JSON document listing every bindable entity:
//!
//! ```json
//! {
//!   "categories": [
//!     { "name": "drinks", "defaultLocation": "fridge", "room": "kitchen",
//!       "objects": [ { "name": "coke", "type": "known", "properties": { "color": "red" } } ] }
//!   ],
//!   "rooms": [
//!     { "name": "kitchen", "locations": [ { "name": "fridge", "beacon": true, "placement": true } ] }
//!   ],
//!   "names": [ { "name": "Alex", "gender": "female" } ],
//!   "gestures": [ "waving" ],
//!   "questions": [ { "question": "What day is today?", "answer": "today", "tier": "easy" } ]
//! }
//! ```
//!
//! Every section is optional. Default locations of categories are added as
//! placements when the rooms section does not list them.

use std::fs;
use std::path::Path;

use cmdgen_entities::{
    Catalog, Category, DifficultyDegree, Gender, Gesture, Location, Object, ObjectKind, PersonName,
    PredefinedQuestion,
};
use cmdgen_foundation::{Error, ErrorContext, PropertyBag, Result};
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CatalogFile {
    categories: Vec<CategoryEntry>,
    rooms: Vec<RoomEntry>,
    names: Vec<NameEntry>,
    gestures: Vec<String>,
    questions: Vec<QuestionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    default_location: Option<String>,
    #[serde(default)]
    room: Option<String>,
    #[serde(default)]
    objects: Vec<ObjectEntry>,
}

#[derive(Debug, Deserialize)]
struct ObjectEntry {
    name: String,
    #[serde(default, rename = "type")]
    kind: ObjectKind,
    #[serde(default)]
    properties: PropertyBag,
}

#[derive(Debug, Deserialize)]
struct RoomEntry {
    name: String,
    #[serde(default)]
    locations: Vec<LocationEntry>,
    #[serde(default)]
    properties: PropertyBag,
}

#[derive(Debug, Deserialize)]
struct LocationEntry {
    name: String,
    #[serde(default)]
    beacon: bool,
    #[serde(default)]
    placement: bool,
    #[serde(default)]
    properties: PropertyBag,
}

#[derive(Debug, Deserialize)]
struct NameEntry {
    name: String,
    gender: Gender,
}

#[derive(Debug, Deserialize)]
struct QuestionEntry {
    question: String,
    answer: String,
    #[serde(default)]
    tier: DifficultyDegree,
}

impl CatalogFile {
    fn into_catalog(self) -> Catalog {
        let mut catalog = Catalog::new();

        for entry in self.categories {
            let mut category = Category::new(entry.name.as_str());
            if let (Some(location), Some(room)) = (entry.default_location, entry.room) {
                category = category.with_default_location(location, room);
            }
            catalog = catalog.with_category(category);
            for object in entry.objects {
                catalog = catalog.with_object(
                    Object::new(object.name, entry.name.as_str())
                        .with_kind(object.kind)
                        .with_properties(object.properties),
                );
            }
        }

        for room in self.rooms {
            catalog = catalog.with_location(Location::room(room.name.as_str()).with_properties(room.properties));
            for entry in room.locations {
                let mut location = Location::specific(entry.name, room.name.as_str()).with_properties(entry.properties);
                if entry.beacon {
                    location = location.beacon();
                }
                if entry.placement {
                    location = location.placement();
                }
                catalog = catalog.with_location(location);
            }
        }

        for name in self.names {
            catalog = catalog.with_name(PersonName::new(name.name, name.gender));
        }
        for gesture in self.gestures {
            catalog = catalog.with_gesture(Gesture::new(gesture));
        }
        for question in self.questions {
            catalog = catalog.with_question(PredefinedQuestion::new(question.question, question.answer).with_tier(question.tier));
        }
        catalog
    }
}

/// Parses a catalog document and fills in missing default locations.
///
/// # Errors
/// Returns a serialization error if the document is malformed.
pub fn parse_catalog(json: &str) -> Result<Catalog> {
    let file: CatalogFile = serde_json::from_str(json).map_err(|e| {
        Error::serialization(format!("catalog: {e}"))
            .with_context(ErrorContext::new().with_position(e.line(), e.column()))
    })?;
    let mut catalog = file.into_catalog();
    let added = catalog.validate_locations();
    if added > 0 {
        debug!(added, "default locations added to catalog");
    }
    Ok(catalog)
}

/// Reads a catalog file.
///
/// # Errors
/// Returns an i/o error if the file cannot be read, or a serialization
/// error if it is malformed.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("cannot read catalog {}: {e}", path.display())))?;
    let catalog = parse_catalog(&json).map_err(|mut e| {
        if let Some(context) = &mut e.context {
            context.source = Some(path.display().to_string());
        }
        e
    })?;
    info!(
        path = %path.display(),
        objects = catalog.objects.len(),
        locations = catalog.locations.len(),
        names = catalog.names.len(),
        "catalog loaded"
    );
    Ok(catalog)
}
