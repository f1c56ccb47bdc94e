// tabkey — Letter-keyed terminal picker for browser tabs
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::allocator::{Letter, allocate};
use super::snapshot::{Snapshot, TabIdentity, TabKey, TabObservation, WindowId};
use std::collections::{BTreeMap, HashMap};

/// A tab that currently answers to a letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub letter: Letter,
    pub window_id: WindowId,
    pub position: usize,
    pub title: String,
    pub url: String,
}

impl RegistryEntry {
    fn from_observation(letter: Letter, tab: &TabObservation) -> Self {
        Self {
            letter,
            window_id: tab.window_id,
            position: tab.position,
            title: tab.title.clone(),
            url: tab.url.clone(),
        }
    }

    pub fn key(&self) -> TabKey {
        TabKey::new(self.title.clone(), self.url.clone())
    }

    pub fn identity(&self) -> TabIdentity {
        TabIdentity { window_id: self.window_id, key: self.key() }
    }
}

/// Letter → tab mapping for the current cycle.
#[derive(Debug, Default)]
pub struct TabRegistry {
    entries: BTreeMap<Letter, RegistryEntry>,
    /// Snapshot the current mapping was built from. Also fixes the window order.
    source: Option<Snapshot>,
    /// Set when entries were dropped locally; the next snapshot is applied even if unchanged.
    dirty: bool,
}

impl TabRegistry {
    /// Rebuild from a fresh snapshot. Returns `false` when the snapshot is
    /// identical to the last one and the mapping was left untouched.
    pub fn rebuild(&mut self, snapshot: &Snapshot) -> bool {
        if !self.dirty && self.source.as_ref() == Some(snapshot) {
            return false;
        }

        let previous: HashMap<TabIdentity, Letter> =
            self.entries.values().map(|e| (e.identity(), e.letter)).collect();
        self.entries = allocate(&previous, snapshot)
            .into_iter()
            .map(|(letter, tab)| (letter, RegistryEntry::from_observation(letter, tab)))
            .collect();
        self.source = Some(snapshot.clone());
        self.dirty = false;
        true
    }

    pub fn resolve(&self, letter: Letter) -> Option<&RegistryEntry> {
        self.entries.get(&letter)
    }

    /// Drop a letter ahead of the next poll, e.g. right after closing its tab.
    pub fn release(&mut self, letter: Letter) -> Option<RegistryEntry> {
        let removed = self.entries.remove(&letter);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn letter_of(&self, identity: &TabIdentity) -> Option<Letter> {
        self.entries.values().find(|e| &e.identity() == identity).map(|e| e.letter)
    }

    /// Entries in letter order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.values()
    }

    /// Entries in the order the browser lists them: window, then position.
    pub fn in_browser_order(&self) -> Vec<&RegistryEntry> {
        let mut ordered: Vec<&RegistryEntry> = self.entries.values().collect();
        match &self.source {
            Some(snapshot) => {
                let window_rank: HashMap<WindowId, usize> = snapshot
                    .tabs
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, t)| (t.window_id, i))
                    .collect();
                ordered.sort_by_key(|e| {
                    (window_rank.get(&e.window_id).copied().unwrap_or(usize::MAX), e.position)
                });
            }
            None => ordered.sort_by_key(|e| (e.window_id, e.position)),
        }
        ordered
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
