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

use super::process::{RunError, run_with_timeout};
use super::{BrowserError, HistoryStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Safari stores visit times as seconds since 2001-01-01 UTC.
const APPLE_EPOCH_UNIX_SECS: i64 = 978_307_200;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryVisit {
    pub visited_at: Option<DateTime<Utc>>,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct RawVisit {
    visit_time: Option<f64>,
    title: Option<String>,
    url: String,
}

/// Browser history read through the `sqlite3` command-line shell.
#[derive(Debug, Clone)]
pub struct SqliteHistory {
    db_path: PathBuf,
    limit: usize,
    timeout: Duration,
}

impl SqliteHistory {
    pub fn new(db_path: PathBuf, limit: usize, timeout: Duration) -> Self {
        Self { db_path, limit, timeout }
    }

    /// `~/Library/Safari/History.db`, if a home directory is known.
    pub fn default_db_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join("Library").join("Safari").join("History.db"))
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait(?Send)]
impl HistoryStore for SqliteHistory {
    async fn search(&self, query: &str) -> Result<Vec<HistoryVisit>, BrowserError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let sqlite3 = which::which("sqlite3").map_err(|_| BrowserError::CommandFailed {
            reason: "`sqlite3` not found on PATH".to_owned(),
        })?;
        if !self.db_path.is_file() {
            return Err(BrowserError::CommandFailed {
                reason: format!("history database not found: {}", self.db_path.display()),
            });
        }

        let mut cmd = Command::new(sqlite3);
        cmd.arg("-readonly")
            .arg("-json")
            .arg(&self.db_path)
            .arg(build_search_sql(query, self.limit));
        let stdout =
            run_with_timeout(cmd, self.timeout).await.map_err(RunError::into_command_error)?;
        let visits = parse_visits(&stdout)?;
        tracing::debug!(query, results = visits.len(), "history search finished");
        Ok(visits)
    }
}

/// Most-recent-first visits whose title or url contains `query`, ignoring ASCII case.
pub fn build_search_sql(query: &str, limit: usize) -> String {
    let pattern = sql_string(&format!("%{}%", escape_like(query)));
    format!(
        "SELECT v.visit_time AS visit_time, v.title AS title, i.url AS url \
         FROM history_visits v JOIN history_items i ON i.id = v.history_item \
         WHERE v.title LIKE {pattern} ESCAPE '\\' OR i.url LIKE {pattern} ESCAPE '\\' \
         ORDER BY v.visit_time DESC LIMIT {limit};"
    )
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn sql_string(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

/// Parse `sqlite3 -json` output. No rows produces no output at all.
pub fn parse_visits(stdout: &str) -> Result<Vec<HistoryVisit>, BrowserError> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<RawVisit> = serde_json::from_str(stdout).map_err(|e| {
        BrowserError::CommandFailed { reason: format!("unreadable history output: {e}") }
    })?;
    Ok(raw
        .into_iter()
        .map(|v| HistoryVisit {
            visited_at: v.visit_time.and_then(apple_time_to_utc),
            title: v.title.unwrap_or_default(),
            url: v.url,
        })
        .collect())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn apple_time_to_utc(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    let unix_secs = APPLE_EPOCH_UNIX_SECS.checked_add(whole as i64)?;
    DateTime::from_timestamp(unix_secs, nanos)
}
