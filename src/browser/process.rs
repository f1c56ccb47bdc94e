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

use super::BrowserError;
use std::time::Duration;
use tokio::process::Command;

/// Why a helper process produced no usable output.
#[derive(Debug)]
pub(crate) enum RunError {
    Timeout(Duration),
    Spawn(std::io::Error),
    Failed { code: Option<i32>, stderr: String },
    NotUtf8,
}

impl RunError {
    pub(crate) fn into_snapshot_error(self) -> BrowserError {
        match self {
            Self::Timeout(after) => BrowserError::Timeout { after },
            other => BrowserError::SnapshotUnavailable { reason: other.describe() },
        }
    }

    pub(crate) fn into_command_error(self) -> BrowserError {
        match self {
            Self::Timeout(after) => BrowserError::Timeout { after },
            other => BrowserError::CommandFailed { reason: other.describe() },
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Timeout(after) => format!("timed out after {}ms", after.as_millis()),
            Self::Spawn(err) => format!("failed to start: {err}"),
            Self::Failed { code, stderr } => {
                let first_line = stderr.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
                match code {
                    Some(code) => format!("exit {code}: {}", first_line.trim()),
                    None => format!("terminated by signal: {}", first_line.trim()),
                }
            }
            Self::NotUtf8 => "output was not valid UTF-8".to_owned(),
        }
    }
}

/// Run `cmd` to completion, waiting at most `timeout`.
///
/// A timed-out child is left running; only the wait is abandoned.
pub(crate) async fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
) -> Result<String, RunError> {
    cmd.stdin(std::process::Stdio::null());
    cmd.kill_on_drop(false);

    let output = tokio::time::timeout(timeout, cmd.output())
        .await
        .map_err(|_| RunError::Timeout(timeout))?
        .map_err(RunError::Spawn)?;

    if !output.status.success() {
        return Err(RunError::Failed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| RunError::NotUtf8)
}
