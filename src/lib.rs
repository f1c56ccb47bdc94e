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

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod session;
pub mod ui;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "tabkey", version, about = "Switch, close and reopen browser tabs by letter")]
pub struct Cli {
    /// Scriptable browser application to drive
    #[arg(long, default_value = "Safari")]
    pub browser: String,

    /// Milliseconds between browser polls
    #[arg(long, default_value_t = 100)]
    pub poll_interval_ms: u64,

    /// Milliseconds to wait for any single browser call
    #[arg(long, default_value_t = 2000)]
    pub timeout_ms: u64,

    /// Browser history database used by search (defaults to Safari's)
    #[arg(long, value_name = "PATH")]
    pub history_db: Option<PathBuf>,

    /// Maximum number of history search results
    #[arg(long, default_value_t = 50)]
    pub history_limit: usize,

    /// Start with full tab titles shown
    #[arg(long)]
    pub full_titles: bool,

    /// Start with per-tab focus time shown
    #[arg(long)]
    pub show_elapsed: bool,

    /// Write tracing diagnostics to a file (enables logging when set)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives (example: `info,tabkey::browser=debug`)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to --log-file instead of truncating
    #[arg(long)]
    pub log_append: bool,
}
