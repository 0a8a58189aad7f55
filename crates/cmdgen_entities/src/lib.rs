//! Domain records and the candidate catalog for cmdgen.
//!
//! This crate provides:
//! - [`Object`] and [`Category`] - Graspable objects and their groups
//! - [`Location`] - Rooms, beacons, and placements
//! - [`PersonName`] and [`Gesture`] - People-related candidates
//! - [`PredefinedQuestion`] - Questions with expected answers
//! - [`Catalog`] - One candidate pool per entity kind

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod location;
pub mod object;
pub mod person;
pub mod question;
pub mod tier;

pub use catalog::Catalog;
pub use location::{Location, LocationKind};
pub use object::{Category, DefaultLocation, Object, ObjectKind};
pub use person::{Gender, Gesture, PersonName};
pub use question::PredefinedQuestion;
pub use tier::DifficultyDegree;
