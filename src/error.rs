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

/// Startup failures. Nothing after the terminal is up is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("osascript not found")]
    OsascriptNotFound,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AppError {
    pub const OSASCRIPT_NOT_FOUND_EXIT_CODE: i32 = 20;
    pub const INVALID_CONFIG_EXIT_CODE: i32 = 21;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OsascriptNotFound => Self::OSASCRIPT_NOT_FOUND_EXIT_CODE,
            Self::InvalidConfig(_) => Self::INVALID_CONFIG_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::OsascriptNotFound => "`osascript` not found. tabkey drives the browser \
through AppleScript and needs macOS."
                .to_owned(),
            Self::InvalidConfig(detail) => format!("Invalid configuration: {detail}"),
        }
    }
}
