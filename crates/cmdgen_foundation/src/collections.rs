//! Candidate pools with structural sharing.
//!
//! A [`Pool`] is a thin wrapper around `im::Vector`. Catalogs hold one pool
//! per entity kind; each generation takes a shuffled copy and consumes it
//! destructively while binding wildcards, leaving the catalog untouched.

use std::fmt;

use rand::Rng;

use crate::rng::shuffle_copy;

/// Persistent sequence of binding candidates.
///
/// Cloning is O(1). Pop operations mutate only this copy.
#[derive(Clone)]
pub struct Pool<T>(im::Vector<T>)
where
    T: Clone;

impl<T: Clone> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Pool<T> {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self(im::Vector::new())
    }

    /// Returns the number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a candidate by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Appends a candidate.
    pub fn push(&mut self, value: T) {
        self.0.push_back(value);
    }

    /// Returns an iterator over the candidates.
    pub fn iter(&self) -> im::vector::Iter<'_, T> {
        self.0.iter()
    }

    /// Returns a copy with the candidates in uniformly random order.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let items: Vec<T> = self.0.iter().cloned().collect();
        Self(shuffle_copy(&items, rng).into_iter().collect())
    }

    /// Removes and returns the first candidate satisfying `pred`.
    pub fn pop_first<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let index = self.0.iter().position(|item| pred(item))?;
        Some(self.0.remove(index))
    }

    /// Removes and returns the last candidate.
    pub fn pop_last(&mut self) -> Option<T> {
        self.0.pop_back()
    }

    /// Removes and returns the last candidate satisfying `pred`.
    pub fn pop_last_where<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let index = (0..self.0.len())
            .rev()
            .find(|&i| self.0.get(i).is_some_and(&mut pred))?;
        Some(self.0.remove(index))
    }

    /// Returns true if any candidate satisfies `pred`.
    pub fn any<F>(&self, pred: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.0.iter().any(pred)
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + PartialEq> PartialEq for Pool<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Clone> FromIterator<T> for Pool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(im::Vector::from_iter(iter))
    }
}

impl<T: Clone> IntoIterator for Pool<T> {
    type Item = T;
    type IntoIter = im::vector::ConsumingIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Clone> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
