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

use super::Mode;
use crate::session::Letter;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub const KEY_TOGGLE_TITLES: char = '.';
pub const KEY_TOGGLE_ELAPSED: char = ',';
pub const KEY_CLOSE_FRONT: char = '\'';
pub const KEY_REOPEN: char = ';';
pub const KEY_FOCUS_BROWSER: char = '/';
pub const KEY_SEARCH: char = '?';
pub const KEY_COPY_URL: char = '+';

/// What a keystroke asks for, independent of terminal encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Activate(Letter),
    Close(Letter),
    ToggleFullTitles,
    ToggleElapsed,
    CloseFront,
    Reopen,
    FocusBrowser,
    EnterSearch,
    CopyFrontUrl,
    Quit,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchUp,
    SearchDown,
    SearchCancel,
}

fn is_ctrl_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) && !modifiers.contains(KeyModifiers::ALT)
}

fn is_ctrl_char_shortcut(key: KeyEvent, expected: char) -> bool {
    is_ctrl_shortcut(key.modifiers)
        && matches!(key.code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&expected))
}

fn handle_always_allowed_shortcuts(key: KeyEvent) -> Option<Command> {
    (is_ctrl_char_shortcut(key, 'q') || is_ctrl_char_shortcut(key, 'c')).then_some(Command::Quit)
}

pub fn map_key(mode: &Mode, key: KeyEvent) -> Option<Command> {
    if let Some(cmd) = handle_always_allowed_shortcuts(key) {
        return Some(cmd);
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match mode {
        Mode::Browsing => map_browsing_key(key),
        Mode::Searching(_) => map_search_key(key),
    }
}

fn map_browsing_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(c) if c.is_ascii_lowercase() => Letter::from_char(c).map(Command::Activate),
        KeyCode::Char(c) if c.is_ascii_uppercase() => Letter::from_char(c).map(Command::Close),
        KeyCode::Char(KEY_TOGGLE_TITLES) => Some(Command::ToggleFullTitles),
        KeyCode::Char(KEY_TOGGLE_ELAPSED) => Some(Command::ToggleElapsed),
        KeyCode::Char(KEY_CLOSE_FRONT) => Some(Command::CloseFront),
        KeyCode::Char(KEY_REOPEN) => Some(Command::Reopen),
        KeyCode::Char(KEY_FOCUS_BROWSER) => Some(Command::FocusBrowser),
        KeyCode::Char(KEY_SEARCH) => Some(Command::EnterSearch),
        KeyCode::Char(KEY_COPY_URL) => Some(Command::CopyFrontUrl),
        _ => None,
    }
}

fn map_search_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc => Some(Command::SearchCancel),
        KeyCode::Enter => Some(Command::SearchSubmit),
        KeyCode::Backspace => Some(Command::SearchBackspace),
        KeyCode::Up => Some(Command::SearchUp),
        KeyCode::Down => Some(Command::SearchDown),
        KeyCode::Char(c) if !c.is_control() => Some(Command::SearchInput(c)),
        _ => None,
    }
}
