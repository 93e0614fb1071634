// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered category sets for discrete scales.

extern crate alloc;

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::{Error, Result};

/// An ordered, duplicate-free set of category names.
///
/// The position of a category is its index in display order. Lookups by name are O(1).
#[derive(Clone, Debug, Default)]
pub struct Categories {
    names: Vec<Arc<str>>,
    index: HashMap<Arc<str>, usize>,
}

impl Categories {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from an explicit display order.
    ///
    /// Fails if a name appears twice: an explicit order is taken literally.
    pub fn from_order<I, S>(order: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let mut out = Self::new();
        for name in order {
            let name = name.into();
            if out.index.contains_key(&name) {
                return Err(Error::InvalidCategories {
                    reason: format!("`{name}` appears more than once in the explicit order"),
                });
            }
            out.push_new(name);
        }
        Ok(out)
    }

    /// Builds a set from names in first-seen order, dropping repeats.
    pub fn from_seen<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let mut out = Self::new();
        for name in names {
            out.insert(name);
        }
        out
    }

    /// Inserts `name` if not already present and returns its position.
    pub fn insert(&mut self, name: impl Into<Arc<str>>) -> usize {
        let name = name.into();
        if let Some(&i) = self.index.get(&name) {
            return i;
        }
        self.push_new(name)
    }

    fn push_new(&mut self, name: Arc<str>) -> usize {
        let i = self.names.len();
        self.index.insert(name.clone(), i);
        self.names.push(name);
        i
    }

    /// Adds every category of `other` not already present, keeping `self`'s order first.
    pub fn extend_from(&mut self, other: &Self) {
        for name in &other.names {
            self.insert(name.clone());
        }
    }

    /// Position of `name` in display order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name at `position`.
    pub fn get(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(|n| &**n)
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names in display order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|n| &**n)
    }
}

impl PartialEq for Categories {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for Categories {}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn first_seen_order_is_kept() {
        let c = Categories::from_seen(["suv", "compact", "suv", "midsize"]);
        let names: Vec<&str> = c.iter().collect();
        assert_eq!(names, vec!["suv", "compact", "midsize"]);
        assert_eq!(c.position("midsize"), Some(2));
        assert_eq!(c.get(1), Some("compact"));
    }

    #[test]
    fn explicit_order_rejects_duplicates() {
        let err = Categories::from_order(["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, Error::InvalidCategories { .. }));
    }

    #[test]
    fn extend_appends_unseen_names() {
        let mut a = Categories::from_seen(["x", "y"]);
        a.extend_from(&Categories::from_seen(["y", "z"]));
        assert_eq!(a.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }
}
