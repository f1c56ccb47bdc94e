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

use super::snapshot::TabKey;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Focus time for one url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveTimeRecord {
    pub accumulated: Duration,
    /// Set while this url is the focused tab.
    pub running_since: Option<Instant>,
}

impl ActiveTimeRecord {
    fn elapsed(&self, now: Instant) -> Duration {
        let running =
            self.running_since.map_or(Duration::ZERO, |since| now.saturating_duration_since(since));
        self.accumulated + running
    }
}

/// Accumulates per-url focus time from successive front-tab observations.
///
/// All instants must come from the monotonic clock. Records are never
/// dropped: a closed tab that reopens continues from its previous total.
#[derive(Debug, Default)]
pub struct ActiveTimeTracker {
    records: HashMap<String, ActiveTimeRecord>,
    current: Option<TabKey>,
}

impl ActiveTimeTracker {
    /// Feed the front tab reported by this poll. `None` means no tab is focused.
    pub fn observe(&mut self, active: Option<&TabKey>, now: Instant) {
        if self.current.as_ref() == active {
            return;
        }

        if let Some(previous) = self.current.take()
            && let Some(record) = self.records.get_mut(&previous.url)
            && let Some(since) = record.running_since.take()
        {
            record.accumulated += now.saturating_duration_since(since);
            tracing::debug!(
                url = %previous.url,
                total_secs = record.accumulated.as_secs_f64(),
                "focus left tab"
            );
        }

        if let Some(next) = active {
            let record = self.records.entry(next.url.clone()).or_default();
            record.running_since = Some(now);
            self.current = Some(next.clone());
        }
    }

    /// Total focus time for `url` as of `now`. Read-only.
    pub fn elapsed(&self, url: &str, now: Instant) -> Duration {
        self.records.get(url).map_or(Duration::ZERO, |r| r.elapsed(now))
    }

    pub fn current(&self) -> Option<&TabKey> {
        self.current.as_ref()
    }

    pub fn record(&self, url: &str) -> Option<&ActiveTimeRecord> {
        self.records.get(url)
    }
}
