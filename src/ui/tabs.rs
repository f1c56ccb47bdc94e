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

use super::format::{display_domain, format_elapsed, shorten_title, strip_counter_badges};
use super::theme;
use crate::app::App;
use crate::session::TabRow;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::time::Instant;

pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
    if area.height == 0 {
        return;
    }
    let rows = app.session.rows(now);
    let lines: Vec<Line<'static>> = if rows.is_empty() {
        vec![Line::from(Span::styled("No open tabs", Style::default().fg(theme::DIM)))]
    } else {
        rows.iter()
            .take(usize::from(area.height))
            .map(|row| row_line(row, app.show_full_titles, app.show_elapsed))
            .collect()
    };
    frame.render_widget(Paragraph::new(lines), area);
}

/// `a: Title - domain  3m 07s` with the front tab highlighted.
pub fn row_line(row: &TabRow, full_titles: bool, show_elapsed: bool) -> Line<'static> {
    let title = strip_counter_badges(&row.title);
    let title = if full_titles { title } else { shorten_title(&title) };

    let mut title_style = Style::default().fg(theme::TITLE);
    if row.is_active {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    let mut spans = vec![
        Span::styled(
            format!("{}: ", row.letter),
            Style::default().fg(theme::LETTER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(title, title_style),
        Span::styled(" - ", Style::default().fg(theme::DIM)),
        Span::styled(display_domain(&row.url), Style::default().fg(theme::DOMAIN)),
    ];
    if show_elapsed {
        spans.push(Span::styled(
            format!("  {}", format_elapsed(row.elapsed)),
            Style::default().fg(theme::ELAPSED),
        ));
    }
    if row.is_active {
        spans.push(Span::styled(
            format!(" {}", theme::ACTIVE_MARKER),
            Style::default().fg(theme::LETTER),
        ));
        Line::from(spans).style(Style::default().bg(theme::ACTIVE_BG))
    } else {
        Line::from(spans)
    }
}
