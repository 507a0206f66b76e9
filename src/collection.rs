// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Ordered, position-addressed record lists
//!
//! Front ends address entries by their current position. Ids stay unique
//! within a collection: inserting a record whose id is already present gives
//! it a fresh one, and replacing a position keeps the id of the entry that
//! was there.

use crate::error::{Error, Result};
use crate::store::CollectionName;
use crate::types::{Entity, RecordId};
use std::collections::HashSet;

/// An ordered list of records belonging to one named collection
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    name: CollectionName,
    items: Vec<T>,
}

impl<T: Entity> Collection<T> {
    /// Wrap loaded records
    #[must_use]
    pub fn new(name: CollectionName, items: Vec<T>) -> Self {
        Self { name, items }
    }

    /// Which collection this is
    #[must_use]
    pub fn name(&self) -> CollectionName {
        self.name
    }

    /// Records in order
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Position of the record with `id`
    #[must_use]
    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Append a record; returns its position (the length before insertion)
    pub fn insert(&mut self, mut item: T) -> usize {
        if self.position_of(item.id()).is_some() {
            item.set_id(RecordId::new());
        }
        let position = self.items.len();
        self.items.push(item);
        position
    }

    /// Replace the record at `selected`, or append when nothing is selected
    pub fn upsert(&mut self, selected: Option<usize>, mut item: T) -> Result<usize> {
        match selected {
            Some(index) => {
                let len = self.items.len();
                let slot = self
                    .items
                    .get_mut(index)
                    .ok_or(Error::IndexOutOfRange { index, len })?;
                item.set_id(slot.id());
                *slot = item;
                Ok(index)
            }
            None => Ok(self.insert(item)),
        }
    }

    /// Remove the record at `index`; later records shift down by one
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Drop every record whose id is in `ids`; returns how many were dropped
    pub fn remove_ids(&mut self, ids: &HashSet<RecordId>) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !ids.contains(&item.id()));
        before - self.items.len()
    }

    /// Ids of all records
    #[must_use]
    pub fn ids(&self) -> HashSet<RecordId> {
        self.items.iter().map(|item| item.id()).collect()
    }

    /// Replace every record, returning the old ones
    pub fn replace_items(&mut self, items: Vec<T>) -> Vec<T> {
        std::mem::replace(&mut self.items, items)
    }
}
