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

use super::process::run_with_timeout;
use super::{BrowserError, CommandSink, SnapshotSource};
use crate::error::AppError;
use crate::session::{Snapshot, TabKey, TabObservation, WindowId};
use anyhow::Context as _;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';
/// What AppleScript prints for an unset property, e.g. the URL of a blank tab.
const MISSING_VALUE: &str = "missing value";

/// Safari (or any app with Safari's scripting dictionary) driven via `osascript`.
#[derive(Debug, Clone)]
pub struct Safari {
    app_name: String,
    osascript: PathBuf,
    timeout: Duration,
}

impl Safari {
    pub fn resolve(app_name: &str, timeout: Duration) -> anyhow::Result<Self> {
        let osascript = which::which("osascript")
            .map_err(|_| anyhow::Error::new(AppError::OsascriptNotFound))
            .context("failed to resolve `osascript`")?;
        Ok(Self { app_name: app_name.to_owned(), osascript, timeout })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    fn command(&self, script: &str) -> Command {
        let mut cmd = Command::new(&self.osascript);
        cmd.arg("-e").arg(script);
        cmd
    }

    async fn query(&self, script: &str) -> Result<String, BrowserError> {
        run_with_timeout(self.command(script), self.timeout)
            .await
            .map_err(super::process::RunError::into_snapshot_error)
    }

    async fn execute(&self, script: &str) -> Result<String, BrowserError> {
        tracing::debug!(app = %self.app_name, "running browser command");
        run_with_timeout(self.command(script), self.timeout)
            .await
            .map_err(super::process::RunError::into_command_error)
    }

    fn list_tabs_script(&self) -> String {
        format!(
            r#"set fieldSep to character id 31
set recordSep to character id 30
set output to ""
tell application {app}
    repeat with aWindow in windows
        try
            set windowId to id of aWindow
            set tabIndex to 0
            repeat with aTab in tabs of aWindow
                set tabIndex to tabIndex + 1
                set tabTitle to name of aTab
                set tabUrl to URL of aTab
                if tabTitle is missing value then set tabTitle to ""
                if tabUrl is missing value then set tabUrl to ""
                set output to output & windowId & fieldSep & tabIndex & fieldSep & tabTitle & fieldSep & tabUrl & recordSep
            end repeat
        end try
    end repeat
end tell
return output"#,
            app = applescript_string(&self.app_name)
        )
    }

    fn active_tab_script(&self) -> String {
        format!(
            r#"tell application {app}
    if (count of windows) is 0 then return ""
    set aTab to current tab of front window
    set tabTitle to name of aTab
    set tabUrl to URL of aTab
    if tabTitle is missing value then set tabTitle to ""
    if tabUrl is missing value then set tabUrl to ""
    return tabTitle & (character id 31) & tabUrl
end tell"#,
            app = applescript_string(&self.app_name)
        )
    }
}

#[async_trait(?Send)]
impl SnapshotSource for Safari {
    async fn list_tabs(&self) -> Result<Snapshot, BrowserError> {
        let stdout = self.query(&self.list_tabs_script()).await?;
        parse_tab_listing(&stdout)
    }

    async fn active_tab(&self) -> Result<Option<TabKey>, BrowserError> {
        let stdout = self.query(&self.active_tab_script()).await?;
        parse_front_tab(&stdout)
    }
}

#[async_trait(?Send)]
impl CommandSink for Safari {
    async fn activate(&self, window_id: WindowId, position: usize) -> Result<(), BrowserError> {
        let script = format!(
            r"tell application {app}
    set aWindow to window id {window_id}
    set current tab of aWindow to tab {position} of aWindow
    set index of aWindow to 1
end tell",
            app = applescript_string(&self.app_name)
        );
        self.execute(&script).await.map(drop)
    }

    async fn close(&self, window_id: WindowId, position: usize) -> Result<String, BrowserError> {
        let script = format!(
            r#"tell application {app}
    set aTab to tab {position} of window id {window_id}
    set tabUrl to URL of aTab
    close aTab
    if tabUrl is missing value then return ""
    return tabUrl
end tell"#,
            app = applescript_string(&self.app_name)
        );
        let stdout = self.execute(&script).await?;
        Ok(clean_field(stdout.trim_end_matches(['\n', '\r'])).to_owned())
    }

    async fn close_front(&self) -> Result<Option<String>, BrowserError> {
        let script = format!(
            r#"tell application {app}
    if (count of windows) is 0 then return ""
    tell front window
        set aTab to current tab
        set tabUrl to URL of aTab
        close aTab
    end tell
    if tabUrl is missing value then set tabUrl to ""
    return "closed" & (character id 31) & tabUrl
end tell"#,
            app = applescript_string(&self.app_name)
        );
        let stdout = self.execute(&script).await?;
        Ok(parse_closed_front(&stdout))
    }

    async fn reopen(&self, url: &str) -> Result<(), BrowserError> {
        let script = format!(
            r"tell application {app}
    if (count of windows) is 0 then
        make new document with properties {{URL:{url}}}
    else
        tell window 1
            set newTab to make new tab with properties {{URL:{url}}}
            set current tab to newTab
        end tell
    end if
end tell",
            app = applescript_string(&self.app_name),
            url = applescript_string(url)
        );
        self.execute(&script).await.map(drop)
    }

    async fn focus_application(&self) -> Result<(), BrowserError> {
        let script = format!("tell application {} to activate", applescript_string(&self.app_name));
        self.execute(&script).await.map(drop)
    }
}

/// Quote `raw` as an AppleScript string literal.
pub fn applescript_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn clean_field(raw: &str) -> &str {
    if raw == MISSING_VALUE { "" } else { raw }
}

/// Parse the record/field separated output of the tab listing script.
pub fn parse_tab_listing(stdout: &str) -> Result<Snapshot, BrowserError> {
    let body = stdout.trim_end_matches(['\n', '\r']);
    let mut tabs = Vec::new();

    for record in body.split(RECORD_SEP).filter(|r| !r.is_empty()) {
        let fields: Vec<&str> = record.split(FIELD_SEP).collect();
        let [window, position, title, url] = fields.as_slice() else {
            return Err(malformed(format!("expected 4 fields, got {}", fields.len())));
        };
        let window_id: WindowId = window
            .trim()
            .parse()
            .map_err(|_| malformed(format!("bad window id `{window}`")))?;
        let position: usize = position
            .trim()
            .parse()
            .map_err(|_| malformed(format!("bad tab index `{position}`")))?;
        tabs.push(TabObservation::new(window_id, position, clean_field(title), clean_field(url)));
    }

    Ok(Snapshot::new(tabs))
}

/// Parse `title<US>url` from the front tab script. Empty output means no window.
pub fn parse_front_tab(stdout: &str) -> Result<Option<TabKey>, BrowserError> {
    let body = stdout.trim_end_matches(['\n', '\r']);
    if body.is_empty() {
        return Ok(None);
    }
    let Some((title, url)) = body.split_once(FIELD_SEP) else {
        return Err(malformed("front tab output has no separator".to_owned()));
    };
    Ok(Some(TabKey::new(clean_field(title), clean_field(url))))
}

/// `closed<US>url` when a tab was closed (the url may be empty), nothing when
/// no window was open.
pub fn parse_closed_front(stdout: &str) -> Option<String> {
    let body = stdout.trim_end_matches(['\n', '\r']);
    body.split_once(FIELD_SEP).map(|(_, url)| clean_field(url).to_owned())
}

fn malformed(reason: String) -> BrowserError {
    BrowserError::SnapshotUnavailable { reason: format!("malformed browser output: {reason}") }
}
