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

use super::format::{display_domain, strip_counter_badges};
use super::theme;
use crate::app::SearchState;
use crate::browser::HistoryVisit;
use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const VISIT_TIME_FORMAT: &str = "%b %d %H:%M";

pub fn render(frame: &mut Frame, area: Rect, search: &SearchState) {
    if area.height == 0 {
        return;
    }

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", theme::PROMPT_CHAR), Style::default().fg(theme::LETTER)),
        Span::styled(search.query.clone(), Style::default().fg(theme::TITLE)),
        Span::styled("█", Style::default().fg(theme::DIM)),
    ])];

    let visible = usize::from(area.height).saturating_sub(1);
    // Keep the selection on screen.
    let skip = (search.selected + 1).saturating_sub(visible);
    lines.extend(
        search
            .results
            .iter()
            .enumerate()
            .skip(skip)
            .take(visible)
            .map(|(i, visit)| result_line(visit, i == search.selected)),
    );

    frame.render_widget(Paragraph::new(lines), area);
}

fn result_line(visit: &HistoryVisit, selected: bool) -> Line<'static> {
    let when = visit
        .visited_at
        .map(|t| t.with_timezone(&Local).format(VISIT_TIME_FORMAT).to_string())
        .unwrap_or_default();
    let title = strip_counter_badges(&visit.title);
    let title = if title.is_empty() { visit.url.clone() } else { title };

    let line = Line::from(vec![
        Span::styled(format!("{when:<12} "), Style::default().fg(theme::DIM)),
        Span::styled(title, Style::default().fg(theme::TITLE)),
        Span::styled(" - ", Style::default().fg(theme::DIM)),
        Span::styled(display_domain(&visit.url), Style::default().fg(theme::DOMAIN)),
    ]);
    if selected {
        line.style(Style::default().bg(theme::SELECTED_BG).add_modifier(Modifier::BOLD))
    } else {
        line
    }
}
