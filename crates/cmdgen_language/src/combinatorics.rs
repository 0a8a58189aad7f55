//! Cross-product enumeration in odometer order.
//!
//! Position `i` of each combination ranges over sequence `i`. The last
//! position turns fastest; when a position runs out it restarts from its
//! first element and carries into the position to its left. Enumeration ends
//! when the first position carries.

use cmdgen_foundation::{Error, ErrorKind, Result};

/// Advances `indices` by one step, given the length of each position.
///
/// Returns true when the first position carried, meaning every index has
/// wrapped back to zero and enumeration is complete.
pub fn increment_indices(indices: &mut [usize], lengths: &[usize]) -> bool {
    for pos in (0..indices.len()).rev() {
        indices[pos] += 1;
        if indices[pos] < lengths.get(pos).copied().unwrap_or(0) {
            return false;
        }
        indices[pos] = 0;
    }
    true
}

/// Lazy cross product over restartable iterators.
///
/// Each source is cloned to obtain a fresh cursor whenever its position
/// carries, so sources must be cheap to clone.
#[derive(Clone)]
pub struct Product<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    sources: Vec<I>,
    cursors: Vec<I>,
    current: Vec<I::Item>,
    started: bool,
    done: bool,
}

impl<I> Product<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    /// Creates the product of `sources`.
    ///
    /// # Errors
    /// Returns [`ErrorKind::EmptySequence`] if any source yields nothing.
    pub fn new(sources: Vec<I>) -> Result<Self> {
        let mut cursors = Vec::with_capacity(sources.len());
        let mut current = Vec::with_capacity(sources.len());
        for source in &sources {
            let mut cursor = source.clone();
            let first = cursor
                .next()
                .ok_or_else(|| Error::new(ErrorKind::EmptySequence))?;
            current.push(first);
            cursors.push(cursor);
        }
        Ok(Self {
            sources,
            cursors,
            current,
            started: false,
            done: false,
        })
    }

    /// Advances the odometer, returning true when it wrapped around.
    fn advance(&mut self) -> bool {
        for pos in (0..self.cursors.len()).rev() {
            if let Some(item) = self.cursors[pos].next() {
                self.current[pos] = item;
                return false;
            }
            let mut fresh = self.sources[pos].clone();
            if let Some(item) = fresh.next() {
                self.current[pos] = item;
            }
            self.cursors[pos] = fresh;
        }
        true
    }
}

impl<I> Iterator for Product<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.started {
            if self.advance() {
                self.done = true;
                return None;
            }
        } else {
            self.started = true;
        }
        Some(self.current.clone())
    }
}

/// Cross product of materialized sequences.
///
/// # Errors
/// Returns [`ErrorKind::EmptySequence`] if any sequence is empty.
pub fn combinations<T: Clone>(sequences: Vec<Vec<T>>) -> Result<Product<std::vec::IntoIter<T>>> {
    Product::new(sequences.into_iter().map(Vec::into_iter).collect())
}
