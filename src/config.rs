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

use crate::Cli;
use crate::browser::SqliteHistory;
use crate::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

/// Validated runtime settings derived from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub browser: String,
    pub poll_interval: Duration,
    pub command_timeout: Duration,
    pub history_db: PathBuf,
    pub history_limit: usize,
    pub full_titles: bool,
    pub show_elapsed: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self, AppError> {
        if cli.browser.trim().is_empty() {
            return Err(AppError::InvalidConfig("--browser must not be empty".into()));
        }
        if cli.poll_interval_ms == 0 {
            return Err(AppError::InvalidConfig("--poll-interval-ms must be > 0".into()));
        }
        if cli.timeout_ms == 0 {
            return Err(AppError::InvalidConfig("--timeout-ms must be > 0".into()));
        }
        if cli.history_limit == 0 {
            return Err(AppError::InvalidConfig("--history-limit must be > 0".into()));
        }

        let history_db = match &cli.history_db {
            Some(path) => path.clone(),
            None => SqliteHistory::default_db_path().ok_or_else(|| {
                AppError::InvalidConfig("no home directory; pass --history-db".into())
            })?,
        };

        Ok(Self {
            browser: cli.browser.trim().to_owned(),
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
            command_timeout: Duration::from_millis(cli.timeout_ms),
            history_db,
            history_limit: cli.history_limit,
            full_titles: cli.full_titles,
            show_elapsed: cli.show_elapsed,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            browser: "Safari".to_owned(),
            poll_interval: Duration::from_millis(100),
            command_timeout: Duration::from_millis(2000),
            history_db: PathBuf::from("History.db"),
            history_limit: 50,
            full_titles: false,
            show_elapsed: false,
        }
    }
}
