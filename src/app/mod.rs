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

mod dispatch;
pub mod keys;
mod search;
mod state;
mod sync;

pub use dispatch::{Outcome, execute};
pub use keys::{Command, map_key};
pub use state::{App, Mode, STATUS_TTL, SearchState, StatusKind, StatusLine};
pub use sync::{PollOutcome, poll};

use crate::browser::{CommandSink, HistoryStore, SnapshotSource};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::{Stream, StreamExt};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// The external collaborators one loop iteration talks to.
#[derive(Clone)]
pub struct Ports {
    pub source: Rc<dyn SnapshotSource>,
    pub sink: Rc<dyn CommandSink>,
    pub history: Rc<dyn HistoryStore>,
}

/// Route one terminal event. Only key presses do anything; resizes are picked
/// up by the next draw.
pub async fn handle_terminal_event(
    app: &mut App,
    ports: &Ports,
    event: Event,
) -> Option<Outcome> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            let cmd = map_key(&app.mode, key)?;
            Some(execute(app, ports, cmd).await)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App, ports: &Ports) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = drive(&mut terminal, app, ports).await;
    ratatui::restore();
    result
}

async fn drive(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
    ports: &Ports,
) -> anyhow::Result<()> {
    let mut events = EventStream::new();
    tracing::info!(browser = %app.browser_name, interval = ?app.poll_interval, "sync loop started");

    loop {
        // Phase 1: reconcile with the browser
        let started = Instant::now();
        poll(app, ports, started).await;

        // Phase 2: render
        terminal.draw(|f| crate::ui::render(f, app, Instant::now()))?;

        // Phase 3: take at most one keystroke, or wait out the interval
        let wait = app.poll_interval.saturating_sub(started.elapsed());
        if let Some(event) = next_event(&mut events, wait).await {
            handle_terminal_event(app, ports, event).await;
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("sync loop stopped");
    Ok(())
}

/// Wait up to `wait` for one terminal event. A failing or finished stream
/// never cuts the wait short.
async fn next_event<S>(events: &mut S, wait: Duration) -> Option<Event>
where
    S: Stream<Item = std::io::Result<Event>> + Unpin,
{
    tokio::select! {
        Some(Ok(event)) = events.next() => Some(event),
        () = tokio::time::sleep(wait) => None,
    }
}
