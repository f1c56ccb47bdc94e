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

/// Browser-assigned window identifier. Stable for the lifetime of a window.
pub type WindowId = i64;

/// Content key used for deduplication and active-time accounting.
///
/// Position is deliberately absent: it shifts whenever tabs are reordered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabKey {
    pub title: String,
    pub url: String,
}

impl TabKey {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into() }
    }
}

/// Key used to recognise "the same tab" across snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabIdentity {
    pub window_id: WindowId,
    pub key: TabKey,
}

/// One tab as reported by the browser in a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabObservation {
    pub window_id: WindowId,
    /// 1-based index of the tab within its window.
    pub position: usize,
    pub title: String,
    pub url: String,
}

impl TabObservation {
    pub fn new(
        window_id: WindowId,
        position: usize,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self { window_id, position, title: title.into(), url: url.into() }
    }

    pub fn key(&self) -> TabKey {
        TabKey::new(self.title.clone(), self.url.clone())
    }

    pub fn identity(&self) -> TabIdentity {
        TabIdentity { window_id: self.window_id, key: self.key() }
    }
}

/// A point-in-time list of all open tabs, window by window, in browser order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub tabs: Vec<TabObservation>,
}

impl Snapshot {
    pub fn new(tabs: Vec<TabObservation>) -> Self {
        Self { tabs }
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Convenience for tests and fakes: tabs listed as `(window, title, url)`,
    /// positions assigned in order within each window.
    pub fn from_triples<'a>(tabs: impl IntoIterator<Item = (WindowId, &'a str, &'a str)>) -> Self {
        let mut positions: std::collections::HashMap<WindowId, usize> =
            std::collections::HashMap::new();
        let tabs = tabs
            .into_iter()
            .map(|(window_id, title, url)| {
                let position = positions.entry(window_id).or_insert(0);
                *position += 1;
                TabObservation::new(window_id, *position, title, url)
            })
            .collect();
        Self { tabs }
    }
}
