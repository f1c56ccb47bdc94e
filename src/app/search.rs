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

use super::dispatch::Outcome;
use super::keys::Command;
use super::{App, Mode, Ports, StatusKind};

/// Handle a command while in search mode. Outside search mode this is stale input.
pub(super) async fn handle(app: &mut App, ports: &Ports, cmd: Command) -> Outcome {
    let Some(search) = app.search_mut() else {
        return Outcome::Stale;
    };

    match cmd {
        Command::SearchInput(c) => search.query.push(c),
        Command::SearchBackspace => {
            search.query.pop();
        }
        Command::SearchUp => search.select_prev(),
        Command::SearchDown => search.select_next(),
        Command::SearchCancel => app.mode = Mode::Browsing,
        Command::SearchSubmit => return submit(app, ports).await,
        _ => return Outcome::Stale,
    }
    Outcome::Applied
}

async fn submit(app: &mut App, ports: &Ports) -> Outcome {
    let Some(search) = app.search() else {
        return Outcome::Stale;
    };

    if search.is_showing_results_for_query() {
        let Some(url) = search.selected_visit().map(|v| v.url.clone()) else {
            return Outcome::Stale;
        };
        return match ports.sink.reopen(&url).await {
            Ok(()) => {
                tracing::info!(%url, "opened history result");
                app.mode = Mode::Browsing;
                Outcome::Applied
            }
            Err(err) => Outcome::Failed(err),
        };
    }

    let query = search.query.trim().to_owned();
    if query.is_empty() {
        return Outcome::Stale;
    }
    match ports.history.search(&query).await {
        Ok(results) => {
            let count = results.len();
            if let Some(search) = app.search_mut() {
                search.results = results;
                search.selected = 0;
                search.submitted = Some(query);
            }
            if count == 0 {
                app.set_status(StatusKind::Info, "No matching history");
            }
            Outcome::Applied
        }
        Err(err) => Outcome::Failed(err),
    }
}
