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

use super::snapshot::{Snapshot, TabIdentity, TabKey, TabObservation, WindowId};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

pub const ALPHABET_LEN: usize = 26;

/// One of the 26 addressable slots, `a` through `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Letter(u8);

impl Letter {
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < ALPHABET_LEN).then(|| Self(index as u8))
    }

    /// Accepts either case; `'B'` and `'b'` name the same slot.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_char(c: char) -> Option<Self> {
        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_lowercase() { Some(Self(lower as u8 - b'a')) } else { None }
    }

    pub fn as_char(self) -> char {
        char::from(b'a' + self.0)
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// All letters in allocation order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ALPHABET_LEN).filter_map(Self::from_index)
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Drop tabs whose `(title, url)` already appeared earlier in the same window.
///
/// Browsers transiently report one tab twice during page transitions. The
/// first occurrence wins; the same pair in another window is kept.
pub fn dedup_within_windows(snapshot: &Snapshot) -> Vec<&TabObservation> {
    let mut seen: HashSet<(WindowId, TabKey)> = HashSet::new();
    snapshot.tabs.iter().filter(|tab| seen.insert((tab.window_id, tab.key()))).collect()
}

/// Assign letters to the tabs of `snapshot`.
///
/// Identities present in `previous` keep their letter. New identities take the
/// lowest free letter in enumeration order. Anything past the 26th slot is
/// left unaddressable.
pub fn allocate<'a>(
    previous: &HashMap<TabIdentity, Letter>,
    snapshot: &'a Snapshot,
) -> BTreeMap<Letter, &'a TabObservation> {
    let mut assigned: BTreeMap<Letter, &TabObservation> = BTreeMap::new();
    let mut pending: Vec<&TabObservation> = Vec::new();

    for tab in dedup_within_windows(snapshot) {
        match previous.get(&tab.identity()) {
            Some(letter) if !assigned.contains_key(letter) => {
                assigned.insert(*letter, tab);
            }
            _ => pending.push(tab),
        }
    }

    let free: Vec<Letter> = Letter::all().filter(|l| !assigned.contains_key(l)).collect();
    for (letter, tab) in free.into_iter().zip(pending) {
        assigned.insert(letter, tab);
    }

    assigned
}
