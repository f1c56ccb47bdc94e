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

use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Column budget for titles in compact mode.
pub const SHORT_TITLE_COLS: usize = 13;

/// Remove unread-count badges like `(13)` and trim.
pub fn strip_counter_badges(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut rest = title;
    while let Some(open) = rest.find('(') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.chars().take_while(char::is_ascii_digit).count();
        if digits > 0 && after[digits..].starts_with(')') {
            rest = &after[digits + 1..];
        } else {
            out.push('(');
            rest = after;
        }
    }
    out.push_str(rest);
    out.trim().to_owned()
}

/// Cut to [`SHORT_TITLE_COLS`] characters without splitting a word, then pad.
pub fn shorten_title(title: &str) -> String {
    let chars: Vec<char> = title.chars().collect();
    let short: String = if chars.len() > SHORT_TITLE_COLS {
        let at_boundary = chars[SHORT_TITLE_COLS - 1].is_whitespace()
            || chars[SHORT_TITLE_COLS].is_whitespace();
        let head = &chars[..SHORT_TITLE_COLS];
        let cut = if at_boundary {
            SHORT_TITLE_COLS
        } else {
            head.iter().rposition(|c| *c == ' ').unwrap_or(SHORT_TITLE_COLS)
        };
        head[..cut].iter().collect()
    } else {
        title.to_owned()
    };
    pad_to_width(short.trim_end(), SHORT_TITLE_COLS)
}

fn pad_to_width(text: &str, cols: usize) -> String {
    let width = UnicodeWidthStr::width(text);
    let mut out = text.to_owned();
    out.extend(std::iter::repeat_n(' ', cols.saturating_sub(width)));
    out
}

/// The recognisable part of a url: host without scheme, `www.` or `.com` suffix.
pub fn display_domain(url: &str) -> String {
    if url.is_empty() || url == "missing value" {
        return String::new();
    }
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.find(".com").map_or(rest, |i| &rest[..i]);
    rest.split('/').next().unwrap_or(rest).to_owned()
}

/// `42s`, `3m 07s`, `2h 05m`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    }
}
