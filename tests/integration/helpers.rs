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

use async_trait::async_trait;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tabkey::app::{App, Outcome, Ports};
use tabkey::browser::{BrowserError, CommandSink, HistoryStore, HistoryVisit, SnapshotSource};
use tabkey::session::{Snapshot, TabKey, WindowId};

/// A call the app made against the browser, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Activate(WindowId, usize),
    Close(WindowId, usize),
    CloseFront,
    Reopen(String),
    Focus,
    Search(String),
}

/// In-memory browser. Snapshots are served from a queue; once it runs dry the
/// last successful snapshot is repeated.
#[derive(Default)]
pub struct FakeBrowser {
    snapshots: RefCell<VecDeque<Result<Snapshot, BrowserError>>>,
    last: RefCell<Snapshot>,
    active: RefCell<Option<TabKey>>,
    active_error: RefCell<Option<BrowserError>>,
    history: RefCell<Vec<HistoryVisit>>,
    fail_commands: Cell<bool>,
    calls: RefCell<Vec<Call>>,
}

impl FakeBrowser {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn queue(&self, snapshot: Result<Snapshot, BrowserError>) {
        self.snapshots.borrow_mut().push_back(snapshot);
    }

    pub fn queue_tabs<'a>(&self, tabs: impl IntoIterator<Item = (WindowId, &'a str, &'a str)>) {
        self.queue(Ok(Snapshot::from_triples(tabs)));
    }

    pub fn set_active(&self, title: &str, url: &str) {
        *self.active.borrow_mut() = Some(TabKey::new(title, url));
    }

    pub fn set_active_error(&self, err: Option<BrowserError>) {
        *self.active_error.borrow_mut() = err;
    }

    pub fn set_history(&self, visits: Vec<HistoryVisit>) {
        *self.history.borrow_mut() = visits;
    }

    pub fn fail_commands(&self, fail: bool) {
        self.fail_commands.set(fail);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<(), BrowserError> {
        self.calls.borrow_mut().push(call);
        if self.fail_commands.get() {
            return Err(BrowserError::CommandFailed { reason: "scripted failure".into() });
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl SnapshotSource for FakeBrowser {
    async fn list_tabs(&self) -> Result<Snapshot, BrowserError> {
        let next = self.snapshots.borrow_mut().pop_front();
        match next {
            Some(Ok(snapshot)) => {
                *self.last.borrow_mut() = snapshot.clone();
                Ok(snapshot)
            }
            Some(Err(err)) => Err(err),
            None => Ok(self.last.borrow().clone()),
        }
    }

    async fn active_tab(&self) -> Result<Option<TabKey>, BrowserError> {
        if let Some(err) = self.active_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.active.borrow().clone())
    }
}

#[async_trait(?Send)]
impl CommandSink for FakeBrowser {
    async fn activate(&self, window_id: WindowId, position: usize) -> Result<(), BrowserError> {
        self.record(Call::Activate(window_id, position))
    }

    async fn close(&self, window_id: WindowId, position: usize) -> Result<String, BrowserError> {
        self.record(Call::Close(window_id, position))?;
        self.last
            .borrow()
            .tabs
            .iter()
            .find(|t| t.window_id == window_id && t.position == position)
            .map(|t| t.url.clone())
            .ok_or_else(|| BrowserError::CommandFailed { reason: "no such tab".into() })
    }

    async fn close_front(&self) -> Result<Option<String>, BrowserError> {
        self.record(Call::CloseFront)?;
        Ok(self.active.borrow_mut().take().map(|tab| tab.url))
    }

    async fn reopen(&self, url: &str) -> Result<(), BrowserError> {
        self.record(Call::Reopen(url.to_owned()))
    }

    async fn focus_application(&self) -> Result<(), BrowserError> {
        self.record(Call::Focus)
    }
}

#[async_trait(?Send)]
impl HistoryStore for FakeBrowser {
    async fn search(&self, query: &str) -> Result<Vec<HistoryVisit>, BrowserError> {
        self.record(Call::Search(query.to_owned()))?;
        Ok(self
            .history
            .borrow()
            .iter()
            .filter(|v| v.title.contains(query) || v.url.contains(query))
            .cloned()
            .collect())
    }
}

pub fn ports(fake: &Rc<FakeBrowser>) -> Ports {
    Ports { source: fake.clone(), sink: fake.clone(), history: fake.clone() }
}

/// Build a minimal `App` for integration testing. No terminal, just state.
pub fn test_app() -> App {
    App::test_default()
}

pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Feed a keystroke through the same path the terminal loop uses.
pub async fn press(app: &mut App, ports: &Ports, code: KeyCode) -> Option<Outcome> {
    tabkey::app::handle_terminal_event(app, ports, key(code)).await
}

pub async fn type_text(app: &mut App, ports: &Ports, text: &str) {
    for c in text.chars() {
        press(app, ports, KeyCode::Char(c)).await;
    }
}
