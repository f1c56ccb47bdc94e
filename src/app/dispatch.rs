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

use super::keys::Command;
use super::{App, Mode, Ports, SearchState, StatusKind};
use crate::browser::BrowserError;
use crate::session::Letter;

/// What came of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The command referred to something that no longer exists. Ignored.
    Stale,
    /// The browser rejected the command. Surfaced on the status line only.
    Failed(BrowserError),
}

pub async fn execute(app: &mut App, ports: &Ports, cmd: Command) -> Outcome {
    tracing::debug!(?cmd, "dispatch");
    let outcome = match cmd {
        Command::Activate(letter) => activate(app, ports, letter).await,
        Command::Close(letter) => close(app, ports, letter).await,
        Command::CloseFront => close_front(app, ports).await,
        Command::Reopen => reopen(app, ports).await,
        Command::FocusBrowser => applied(ports.sink.focus_application().await),
        Command::CopyFrontUrl => copy_front_url(app, ports).await,
        Command::ToggleFullTitles => {
            app.show_full_titles = !app.show_full_titles;
            Outcome::Applied
        }
        Command::ToggleElapsed => {
            app.show_elapsed = !app.show_elapsed;
            Outcome::Applied
        }
        Command::EnterSearch => {
            app.mode = Mode::Searching(SearchState::default());
            Outcome::Applied
        }
        Command::Quit => {
            app.should_quit = true;
            Outcome::Applied
        }
        Command::SearchInput(_)
        | Command::SearchBackspace
        | Command::SearchSubmit
        | Command::SearchUp
        | Command::SearchDown
        | Command::SearchCancel => super::search::handle(app, ports, cmd).await,
    };

    match &outcome {
        Outcome::Failed(err) => app.set_status(StatusKind::Error, err.to_string()),
        Outcome::Stale => tracing::debug!(?cmd, "stale reference ignored"),
        Outcome::Applied => {}
    }
    outcome
}

fn applied(result: Result<(), BrowserError>) -> Outcome {
    match result {
        Ok(()) => Outcome::Applied,
        Err(err) => Outcome::Failed(err),
    }
}

async fn activate(app: &App, ports: &Ports, letter: Letter) -> Outcome {
    let Some(entry) = app.session.registry.resolve(letter) else {
        return Outcome::Stale;
    };
    applied(ports.sink.activate(entry.window_id, entry.position).await)
}

async fn close(app: &mut App, ports: &Ports, letter: Letter) -> Outcome {
    let Some(entry) = app.session.registry.resolve(letter).cloned() else {
        return Outcome::Stale;
    };
    match ports.sink.close(entry.window_id, entry.position).await {
        Ok(url) => {
            let url = if url.is_empty() { entry.url.clone() } else { url };
            if !url.is_empty() {
                app.session.closed.push(url);
            }
            app.session.registry.release(letter);
            Outcome::Applied
        }
        Err(err) => Outcome::Failed(err),
    }
}

async fn close_front(app: &mut App, ports: &Ports) -> Outcome {
    match ports.sink.close_front().await {
        Ok(Some(url)) => {
            // A blank tab closes fine but leaves nothing to reopen.
            if !url.is_empty() {
                app.session.closed.push(url);
            }
            Outcome::Applied
        }
        Ok(None) => Outcome::Stale,
        Err(err) => Outcome::Failed(err),
    }
}

async fn reopen(app: &mut App, ports: &Ports) -> Outcome {
    let Some(url) = app.session.closed.pop() else {
        app.set_status(StatusKind::Info, "Nothing to reopen");
        return Outcome::Stale;
    };
    match ports.sink.reopen(&url).await {
        Ok(()) => Outcome::Applied,
        Err(err) => {
            // Keep the url so the user can retry.
            app.session.closed.push(url);
            Outcome::Failed(err)
        }
    }
}

async fn copy_front_url(app: &mut App, ports: &Ports) -> Outcome {
    let url = match ports.source.active_tab().await {
        Ok(Some(tab)) if !tab.url.is_empty() => tab.url,
        Ok(_) => return Outcome::Stale,
        Err(err) => return Outcome::Failed(err),
    };
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(url.clone())) {
        Ok(()) => {
            app.set_status(StatusKind::Info, format!("Copied {url}"));
            Outcome::Applied
        }
        Err(err) => Outcome::Failed(BrowserError::CommandFailed {
            reason: format!("clipboard unavailable: {err}"),
        }),
    }
}
