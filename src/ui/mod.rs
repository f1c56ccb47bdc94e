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

pub mod format;
mod search;
mod tabs;
pub mod theme;

use crate::app::keys::{
    KEY_CLOSE_FRONT, KEY_COPY_URL, KEY_FOCUS_BROWSER, KEY_REOPEN, KEY_SEARCH, KEY_TOGGLE_ELAPSED,
    KEY_TOGGLE_TITLES,
};
use crate::app::{App, Mode, StatusKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::time::Instant;

pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let [header, header_sep, body, footer_sep, status, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, app);
    render_separator(frame, header_sep);
    match &app.mode {
        Mode::Browsing => tabs::render(frame, body, app, now),
        Mode::Searching(state) => search::render(frame, body, state),
    }
    render_separator(frame, footer_sep);
    render_status(frame, status, app, now);
    render_footer(frame, footer, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let sep = Span::styled("  \u{2502}  ", Style::default().fg(theme::DIM));
    let mut spans = vec![
        Span::styled(
            format!("{} Tabs", app.browser_name),
            Style::default().fg(theme::HEADER).add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
        Span::styled(
            format!("{} addressable", app.session.registry.len()),
            Style::default().fg(theme::DIM),
        ),
    ];
    let closed = app.session.closed.len();
    if closed > 0 {
        spans.push(sep);
        spans.push(Span::styled(format!("{closed} closed"), Style::default().fg(theme::DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let line = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    frame.render_widget(Paragraph::new(Span::styled(line, Style::default().fg(theme::DIM))), area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    let Some((kind, text)) = app.visible_status(now) else {
        return;
    };
    let color = match kind {
        StatusKind::Info => theme::STATUS_INFO,
        StatusKind::Error => theme::STATUS_ERROR,
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text.to_owned(), Style::default().fg(color))),
        area,
    );
}

fn footer_items(app: &App) -> Vec<(String, &'static str)> {
    match app.mode {
        Mode::Browsing => vec![
            ("a-z".to_owned(), "switch"),
            ("A-Z".to_owned(), "close"),
            (KEY_CLOSE_FRONT.to_string(), "close front"),
            (KEY_REOPEN.to_string(), "reopen"),
            (KEY_FOCUS_BROWSER.to_string(), "focus"),
            (KEY_SEARCH.to_string(), "history"),
            (KEY_COPY_URL.to_string(), "copy url"),
            (KEY_TOGGLE_TITLES.to_string(), "titles"),
            (KEY_TOGGLE_ELAPSED.to_string(), "time"),
            ("esc".to_owned(), "quit"),
        ],
        Mode::Searching(_) => vec![
            ("enter".to_owned(), "search / open"),
            ("\u{2191}\u{2193}".to_owned(), "select"),
            ("esc".to_owned(), "back"),
        ],
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (i, (key, label)) in footer_items(app).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key, Style::default().fg(theme::TITLE)));
        spans.push(Span::styled(format!(" {label}"), Style::default().fg(theme::DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
