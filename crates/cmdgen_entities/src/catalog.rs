//! The candidate catalog.
//!
//! A [`Catalog`] holds one [`Pool`] per entity kind. Generators keep a master
//! catalog and take a [`Catalog::shuffled`] copy for every generation, which the
//! binder then consumes by popping candidates.

use std::sync::Arc;

use cmdgen_foundation::Pool;
use rand::Rng;

use crate::location::Location;
use crate::object::{Category, Object};
use crate::person::{Gesture, PersonName};
use crate::question::PredefinedQuestion;

/// Pools of every bindable entity kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    /// Object categories.
    pub categories: Pool<Arc<Category>>,
    /// Gestures.
    pub gestures: Pool<Arc<Gesture>>,
    /// Rooms and specific locations.
    pub locations: Pool<Arc<Location>>,
    /// Person names.
    pub names: Pool<Arc<PersonName>>,
    /// Objects.
    pub objects: Pool<Arc<Object>>,
    /// Predefined questions.
    pub questions: Pool<Arc<PredefinedQuestion>>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.push(Arc::new(category));
        self
    }

    /// Adds a gesture.
    #[must_use]
    pub fn with_gesture(mut self, gesture: Gesture) -> Self {
        self.gestures.push(Arc::new(gesture));
        self
    }

    /// Adds a location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(Arc::new(location));
        self
    }

    /// Adds a person name.
    #[must_use]
    pub fn with_name(mut self, name: PersonName) -> Self {
        self.names.push(Arc::new(name));
        self
    }

    /// Adds an object.
    #[must_use]
    pub fn with_object(mut self, object: Object) -> Self {
        self.objects.push(Arc::new(object));
        self
    }

    /// Adds a predefined question.
    #[must_use]
    pub fn with_question(mut self, question: PredefinedQuestion) -> Self {
        self.questions.push(Arc::new(question));
        self
    }

    /// Appends every entity of `other`.
    pub fn merge(&mut self, other: &Self) {
        fn extend<T: Clone>(into: &mut Pool<T>, from: &Pool<T>) {
            for item in from {
                into.push(item.clone());
            }
        }
        extend(&mut self.categories, &other.categories);
        extend(&mut self.gestures, &other.gestures);
        extend(&mut self.locations, &other.locations);
        extend(&mut self.names, &other.names);
        extend(&mut self.objects, &other.objects);
        extend(&mut self.questions, &other.questions);
    }

    /// Total number of entities across all pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
            + self.gestures.len()
            + self.locations.len()
            + self.names.len()
            + self.objects.len()
            + self.questions.len()
    }

    /// Returns true if every pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds a location by case-insensitive name.
    #[must_use]
    pub fn location(&self, name: &str) -> Option<&Arc<Location>> {
        self.locations
            .iter()
            .find(|l| l.name().eq_ignore_ascii_case(name))
    }

    /// Finds a category by case-insensitive name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Arc<Category>> {
        self.categories
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Adds every category's default location, and its room, when missing.
    ///
    /// Default locations are added as placements. Returns how many locations
    /// were added.
    pub fn validate_locations(&mut self) -> usize {
        let defaults: Vec<_> = self
            .categories
            .iter()
            .filter_map(|c| c.default_location().cloned())
            .collect();

        let mut added = 0;
        for default in defaults {
            if self.location(&default.room).is_none() {
                self.locations.push(Arc::new(Location::room(default.room.as_str())));
                added += 1;
            }
            if self.location(&default.location).is_none() {
                self.locations.push(Arc::new(
                    Location::specific(default.location, default.room).placement(),
                ));
                added += 1;
            }
        }
        added
    }

    /// Returns a copy with every pool shuffled.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            categories: self.categories.shuffled(rng),
            gestures: self.gestures.shuffled(rng),
            locations: self.locations.shuffled(rng),
            names: self.names.shuffled(rng),
            objects: self.objects.shuffled(rng),
            questions: self.questions.shuffled(rng),
        }
    }
}
