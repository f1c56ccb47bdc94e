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

use super::{App, Ports};
use crate::browser::BrowserError;
use std::time::Instant;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Snapshot applied; `changed` is false when the registry was left as is.
    Synced { changed: bool },
    /// The tab list could not be read. Registry and tracker keep last-known-good state.
    Unavailable,
}

/// Pull a snapshot, rebuild the registry, then feed the front tab to the tracker.
pub async fn poll(app: &mut App, ports: &Ports, now: Instant) -> PollOutcome {
    let snapshot = match ports.source.list_tabs().await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            if app.snapshot_error.is_none() {
                tracing::warn!("tab snapshot failed: {err}");
            }
            app.snapshot_error = Some(err.to_string());
            return PollOutcome::Unavailable;
        }
    };
    if app.snapshot_error.take().is_some() {
        tracing::info!("tab snapshot recovered");
    }
    let changed = app.session.apply_snapshot(&snapshot);

    match ports.source.active_tab().await {
        Ok(active) => app.session.observe_active(active.as_ref(), now),
        Err(err @ BrowserError::Timeout { .. }) => {
            tracing::warn!("front tab query timed out: {err}");
            app.snapshot_error = Some(err.to_string());
        }
        Err(err) => {
            tracing::debug!("front tab unavailable, keeping previous: {err}");
        }
    }

    PollOutcome::Synced { changed }
}
