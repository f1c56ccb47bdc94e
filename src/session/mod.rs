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

pub mod allocator;
pub mod registry;
pub mod snapshot;
pub mod tracker;
pub mod undo;

pub use allocator::{ALPHABET_LEN, Letter};
pub use registry::{RegistryEntry, TabRegistry};
pub use snapshot::{Snapshot, TabIdentity, TabKey, TabObservation, WindowId};
pub use tracker::{ActiveTimeRecord, ActiveTimeTracker};
pub use undo::ClosedTabStack;

use std::time::{Duration, Instant};

/// Row handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRow {
    pub letter: Letter,
    pub title: String,
    pub url: String,
    pub elapsed: Duration,
    pub is_active: bool,
}

/// Everything reconciled across polls. Owned by the sync loop, never shared.
#[derive(Debug, Default)]
pub struct SessionState {
    pub registry: TabRegistry,
    pub tracker: ActiveTimeTracker,
    pub closed: ClosedTabStack,
}

impl SessionState {
    /// Rebuild the registry from a new snapshot. Returns whether anything changed.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        let changed = self.registry.rebuild(snapshot);
        if changed {
            tracing::debug!(
                tabs = snapshot.len(),
                addressable = self.registry.len(),
                "registry rebuilt"
            );
        }
        changed
    }

    pub fn observe_active(&mut self, active: Option<&TabKey>, now: Instant) {
        self.tracker.observe(active, now);
    }

    /// Registry entries in browser order, joined with their focus time.
    pub fn rows(&self, now: Instant) -> Vec<TabRow> {
        let current = self.tracker.current();
        self.registry
            .in_browser_order()
            .into_iter()
            .map(|entry| TabRow {
                letter: entry.letter,
                title: entry.title.clone(),
                url: entry.url.clone(),
                elapsed: self.tracker.elapsed(&entry.url, now),
                is_active: current.is_some_and(|key| *key == entry.key()),
            })
            .collect()
    }
}
