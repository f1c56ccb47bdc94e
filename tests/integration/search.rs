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

// History search mode: type, submit, pick, open.

use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use tabkey::app::{Mode, Outcome};
use tabkey::browser::HistoryVisit;

use crate::helpers::{Call, FakeBrowser, ports, press, test_app, type_text};

fn visit(title: &str, url: &str) -> HistoryVisit {
    HistoryVisit { visited_at: None, title: title.into(), url: url.into() }
}

fn seeded() -> std::rc::Rc<FakeBrowser> {
    let fake = FakeBrowser::new();
    fake.set_history(vec![
        visit("The Rust Book", "https://doc.rust-lang.org/book"),
        visit("Rust Blog", "https://blog.rust-lang.org"),
        visit("Mail", "https://mail.com"),
    ]);
    fake
}

#[tokio::test]
async fn search_then_open_selected_result() {
    let fake = seeded();
    let ports = ports(&fake);
    let mut app = test_app();

    press(&mut app, &ports, KeyCode::Char('?')).await;
    assert!(app.is_searching());

    // Letters are query text here, not tab commands.
    type_text(&mut app, &ports, "Rust").await;
    press(&mut app, &ports, KeyCode::Enter).await;

    let search = app.search().unwrap();
    assert_eq!(search.results.len(), 2);
    assert_eq!(search.submitted.as_deref(), Some("Rust"));

    press(&mut app, &ports, KeyCode::Down).await;
    press(&mut app, &ports, KeyCode::Enter).await;

    assert_eq!(
        fake.calls(),
        vec![Call::Search("Rust".into()), Call::Reopen("https://blog.rust-lang.org".into())]
    );
    assert!(matches!(app.mode, Mode::Browsing));
}

#[tokio::test]
async fn editing_the_query_searches_again() {
    let fake = seeded();
    let ports = ports(&fake);
    let mut app = test_app();

    press(&mut app, &ports, KeyCode::Char('?')).await;
    type_text(&mut app, &ports, "Rust").await;
    press(&mut app, &ports, KeyCode::Enter).await;
    press(&mut app, &ports, KeyCode::Backspace).await;
    press(&mut app, &ports, KeyCode::Backspace).await;
    press(&mut app, &ports, KeyCode::Backspace).await;
    press(&mut app, &ports, KeyCode::Backspace).await;
    type_text(&mut app, &ports, "Mail").await;
    press(&mut app, &ports, KeyCode::Enter).await;

    assert_eq!(fake.calls(), vec![Call::Search("Rust".into()), Call::Search("Mail".into())]);
    assert_eq!(app.search().unwrap().results, vec![visit("Mail", "https://mail.com")]);
    assert!(app.is_searching());
}

#[tokio::test]
async fn no_results_reports_and_stays_in_search() {
    let fake = seeded();
    let ports = ports(&fake);
    let mut app = test_app();

    press(&mut app, &ports, KeyCode::Char('?')).await;
    type_text(&mut app, &ports, "zzz").await;
    press(&mut app, &ports, KeyCode::Enter).await;

    assert_eq!(app.status.as_ref().map(|s| s.text.as_str()), Some("No matching history"));
    // With nothing to open, Enter simply searches again.
    press(&mut app, &ports, KeyCode::Enter).await;
    assert_eq!(fake.calls(), vec![Call::Search("zzz".into()), Call::Search("zzz".into())]);
    assert!(app.is_searching());
}

#[tokio::test]
async fn blank_query_is_not_submitted() {
    let fake = seeded();
    let ports = ports(&fake);
    let mut app = test_app();

    press(&mut app, &ports, KeyCode::Char('?')).await;
    type_text(&mut app, &ports, "  ").await;

    assert_eq!(press(&mut app, &ports, KeyCode::Enter).await, Some(Outcome::Stale));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn escape_leaves_search_without_quitting() {
    let fake = seeded();
    let ports = ports(&fake);
    let mut app = test_app();

    press(&mut app, &ports, KeyCode::Char('?')).await;
    type_text(&mut app, &ports, "Ru").await;
    press(&mut app, &ports, KeyCode::Esc).await;

    assert!(matches!(app.mode, Mode::Browsing));
    assert!(!app.should_quit);
    assert!(fake.calls().is_empty());
}
