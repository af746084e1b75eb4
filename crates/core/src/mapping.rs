// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Source ticket id to destination issue mapping.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// A destination issue reference with its parsed number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub reference: String,
    pub number: u64,
}

impl Destination {
    /// Parses the destination number from the last path segment of `reference`.
    pub fn parse(reference: &str) -> Result<Self> {
        match destination_number(reference) {
            Some(number) => Ok(Destination {
                reference: reference.to_string(),
                number,
            }),
            None => Err(Error::InvalidReference(reference.to_string())),
        }
    }
}

/// Extracts the trailing issue number from a destination reference.
pub fn destination_number(reference: &str) -> Option<u64> {
    let tail = reference.trim_end_matches('/').rsplit('/').next()?;
    tail.parse().ok()
}

/// Append-only mapping from source ticket id to destination reference.
#[derive(Debug, Clone, Default)]
pub struct IdMapping {
    entries: HashMap<u64, Destination>,
}

impl IdMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a confirmed or predicted destination for `id`.
    ///
    /// Keys are never overwritten.
    pub fn insert(&mut self, id: u64, reference: &str) -> Result<()> {
        if self.entries.contains_key(&id) {
            return Err(Error::DuplicateMapping(id));
        }
        let destination = Destination::parse(reference)?;
        self.entries.insert(id, destination);
        Ok(())
    }

    pub fn get(&self, id: u64) -> Option<&Destination> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Destination)> {
        self.entries.iter().map(|(id, destination)| (*id, destination))
    }

    /// Adds every entry of `other` whose key is not already present.
    ///
    /// Used to fill gaps in confirmed mappings with predicted ones.
    pub fn merge_missing(&mut self, other: &IdMapping) {
        for (id, destination) in &other.entries {
            self.entries
                .entry(*id)
                .or_insert_with(|| destination.clone());
        }
    }

    /// Highest destination number among references starting with `prefix`.
    ///
    /// Returns 0 when nothing matches.
    pub fn max_number_with_prefix(&self, prefix: &str) -> u64 {
        self.entries
            .values()
            .filter(|d| d.reference.starts_with(prefix))
            .map(|d| d.number)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
