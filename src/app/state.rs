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

use crate::browser::HistoryVisit;
use crate::config::Settings;
use crate::session::SessionState;
use std::time::{Duration, Instant};

/// How long a transient status message stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    /// Query the current `results` answer. `None` until the first submit.
    pub submitted: Option<String>,
    pub results: Vec<HistoryVisit>,
    pub selected: usize,
}

impl SearchState {
    /// Whether Enter should open the selection rather than search again.
    pub fn is_showing_results_for_query(&self) -> bool {
        !self.results.is_empty() && self.submitted.as_deref() == Some(self.query.trim())
    }

    pub fn selected_visit(&self) -> Option<&HistoryVisit> {
        self.results.get(self.selected)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }
}

/// Mutually exclusive interaction modes. Starts in `Browsing`.
#[derive(Debug, Default)]
pub enum Mode {
    #[default]
    Browsing,
    Searching(SearchState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
    pub set_at: Instant,
}

pub struct App {
    pub session: SessionState,
    pub mode: Mode,
    pub browser_name: String,
    pub poll_interval: Duration,
    /// Toggled by `.`.
    pub show_full_titles: bool,
    /// Toggled by `,`.
    pub show_elapsed: bool,
    pub should_quit: bool,
    /// Set while the last poll failed; the registry then shows last-known-good data.
    pub snapshot_error: Option<String>,
    pub status: Option<StatusLine>,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: SessionState::default(),
            mode: Mode::Browsing,
            browser_name: settings.browser.clone(),
            poll_interval: settings.poll_interval,
            show_full_titles: settings.full_titles,
            show_elapsed: settings.show_elapsed,
            should_quit: false,
            snapshot_error: None,
            status: None,
        }
    }

    /// Minimal app for tests: default settings, no terminal.
    pub fn test_default() -> Self {
        Self::new(&Settings::default())
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        let text = text.into();
        match kind {
            StatusKind::Info => tracing::debug!(status = %text, "status"),
            StatusKind::Error => tracing::warn!(status = %text, "status"),
        }
        self.status = Some(StatusLine { text, kind, set_at: Instant::now() });
    }

    /// The status to show right now: a failing poll wins over transient messages.
    pub fn visible_status(&self, now: Instant) -> Option<(StatusKind, &str)> {
        if let Some(err) = &self.snapshot_error {
            return Some((StatusKind::Error, err.as_str()));
        }
        self.status
            .as_ref()
            .filter(|s| now.saturating_duration_since(s.set_at) < STATUS_TTL)
            .map(|s| (s.kind, s.text.as_str()))
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.mode, Mode::Searching(_))
    }

    pub fn search(&self) -> Option<&SearchState> {
        match &self.mode {
            Mode::Searching(search) => Some(search),
            Mode::Browsing => None,
        }
    }

    pub fn search_mut(&mut self) -> Option<&mut SearchState> {
        match &mut self.mode {
            Mode::Searching(search) => Some(search),
            Mode::Browsing => None,
        }
    }
}
