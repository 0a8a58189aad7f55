//! Core errors, values, and candidate pools for the command generator.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`Value`] - Property values seen by where-clause evaluation
//! - [`Queryable`] - The capability candidate entities expose
//! - [`Pool`] - Persistent candidate pools consumed during binding
//! - [`GenRng`] - The seeded random source

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod queryable;
pub mod rng;
pub mod value;

pub use collections::Pool;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use queryable::{PropertyBag, Queryable};
pub use rng::{GenRng, from_entropy, random_pick, seeded, select_uniform, shuffle_copy};
pub use value::{Value, ValueType};
