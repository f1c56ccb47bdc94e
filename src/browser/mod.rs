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

//! The browser as seen from the sync loop: something to poll, something to
//! command, and a history database to search. Every call is a child process
//! with a bounded wait.

pub mod history;
pub(crate) mod process;
pub mod safari;

use crate::session::{Snapshot, TabKey, WindowId};
use async_trait::async_trait;
use std::time::Duration;

pub use history::{HistoryVisit, SqliteHistory};
pub use safari::Safari;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrowserError {
    #[error("browser state unavailable: {reason}")]
    SnapshotUnavailable { reason: String },
    #[error("browser did not answer within {}ms", after.as_millis())]
    Timeout { after: Duration },
    #[error("command failed: {reason}")]
    CommandFailed { reason: String },
}

/// Read side of the browser. Polled once per loop iteration.
#[async_trait(?Send)]
pub trait SnapshotSource {
    async fn list_tabs(&self) -> Result<Snapshot, BrowserError>;

    /// The focused tab of the front window, `None` when no window is open.
    async fn active_tab(&self) -> Result<Option<TabKey>, BrowserError>;
}

/// Write side of the browser.
#[async_trait(?Send)]
pub trait CommandSink {
    async fn activate(&self, window_id: WindowId, position: usize) -> Result<(), BrowserError>;

    /// Close a tab, returning the url it showed.
    async fn close(&self, window_id: WindowId, position: usize) -> Result<String, BrowserError>;

    /// Close the front window's current tab, returning its url (empty for a
    /// blank tab). `None` when no window was open.
    async fn close_front(&self) -> Result<Option<String>, BrowserError>;

    async fn reopen(&self, url: &str) -> Result<(), BrowserError>;

    async fn focus_application(&self) -> Result<(), BrowserError>;
}

/// Browsing history, newest visit first.
#[async_trait(?Send)]
pub trait HistoryStore {
    async fn search(&self, query: &str) -> Result<Vec<HistoryVisit>, BrowserError>;
}
