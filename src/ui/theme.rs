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

use ratatui::style::Color;

// Accent
pub const HEADER: Color = Color::Indexed(60);
pub const LETTER: Color = Color::Rgb(244, 118, 0);

// UI chrome
pub const DIM: Color = Color::DarkGray;
pub const PROMPT_CHAR: &str = "❯";
pub const SEPARATOR_CHAR: &str = "─";
pub const ACTIVE_MARKER: &str = "●";

// Rows
pub const TITLE: Color = Color::White;
pub const DOMAIN: Color = Color::Gray;
pub const ELAPSED: Color = Color::Cyan;
pub const ACTIVE_BG: Color = Color::Rgb(40, 44, 52);
pub const SELECTED_BG: Color = Color::Rgb(40, 44, 52);

// Status colors
pub const STATUS_INFO: Color = Color::Yellow;
pub const STATUS_ERROR: Color = Color::Red;
