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

// Poll-driven reconciliation: letter stability, failure handling, focus time.

use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};
use tabkey::app::{PollOutcome, poll};
use tabkey::browser::BrowserError;
use tabkey::session::Letter;

use crate::helpers::{FakeBrowser, ports, press, test_app};

fn letter(c: char) -> Letter {
    Letter::from_char(c).unwrap()
}

fn titles_by_letter(app: &tabkey::app::App) -> Vec<(char, String)> {
    app.session
        .registry
        .entries()
        .map(|e| (e.letter.as_char(), e.title.clone()))
        .collect()
}

#[tokio::test]
async fn first_poll_assigns_letters_in_browser_order() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([
        (1, "Mail", "https://mail.com"),
        (1, "Docs", "https://docs.com"),
        (2, "Chat", "https://chat.com"),
    ]);
    let ports = ports(&fake);
    let mut app = test_app();

    let outcome = poll(&mut app, &ports, Instant::now()).await;

    assert_eq!(outcome, PollOutcome::Synced { changed: true });
    assert_eq!(
        titles_by_letter(&app),
        vec![('a', "Mail".into()), ('b', "Docs".into()), ('c', "Chat".into())]
    );
    let chat = app.session.registry.resolve(letter('c')).unwrap();
    assert_eq!((chat.window_id, chat.position), (2, 1));
}

#[tokio::test]
async fn letters_follow_tabs_across_reorder_and_new_tabs() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([(1, "Mail", "https://mail.com"), (1, "Docs", "https://docs.com")]);
    fake.queue_tabs([
        (1, "News", "https://news.com"),
        (1, "Docs", "https://docs.com"),
        (1, "Mail", "https://mail.com"),
    ]);
    let ports = ports(&fake);
    let mut app = test_app();
    let now = Instant::now();

    poll(&mut app, &ports, now).await;
    poll(&mut app, &ports, now).await;

    assert_eq!(
        titles_by_letter(&app),
        vec![('a', "Mail".into()), ('b', "Docs".into()), ('c', "News".into())]
    );
    let mail = app.session.registry.resolve(letter('a')).unwrap();
    assert_eq!(mail.position, 3);
    // Rows come out in browser order, not letter order.
    let order: Vec<char> = app.session.rows(now).iter().map(|r| r.letter.as_char()).collect();
    assert_eq!(order, vec!['c', 'b', 'a']);
}

#[tokio::test]
async fn unchanged_snapshot_is_not_rebuilt() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([(1, "Mail", "https://mail.com")]);
    let ports = ports(&fake);
    let mut app = test_app();

    poll(&mut app, &ports, Instant::now()).await;
    let second = poll(&mut app, &ports, Instant::now()).await;

    assert_eq!(second, PollOutcome::Synced { changed: false });
    assert_eq!(app.session.registry.len(), 1);
}

#[tokio::test]
async fn snapshot_failure_keeps_last_known_good_registry() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([(1, "Mail", "https://mail.com"), (1, "Docs", "https://docs.com")]);
    fake.queue(Err(BrowserError::Timeout { after: Duration::from_millis(2000) }));
    fake.queue_tabs([(1, "Mail", "https://mail.com"), (1, "Docs", "https://docs.com")]);
    let ports = ports(&fake);
    let mut app = test_app();

    poll(&mut app, &ports, Instant::now()).await;
    let failed = poll(&mut app, &ports, Instant::now()).await;

    assert_eq!(failed, PollOutcome::Unavailable);
    assert_eq!(app.session.registry.len(), 2);
    assert_eq!(app.snapshot_error.as_deref(), Some("browser did not answer within 2000ms"));

    poll(&mut app, &ports, Instant::now()).await;
    assert!(app.snapshot_error.is_none());
    assert_eq!(app.session.registry.len(), 2);
}

#[tokio::test]
async fn empty_browser_clears_the_registry() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([(1, "Mail", "https://mail.com")]);
    fake.queue_tabs([]);
    let ports = ports(&fake);
    let mut app = test_app();

    poll(&mut app, &ports, Instant::now()).await;
    poll(&mut app, &ports, Instant::now()).await;

    assert!(app.session.registry.is_empty());
    assert!(app.session.rows(Instant::now()).is_empty());
}

#[tokio::test]
async fn overflow_tabs_get_a_letter_once_one_frees_up() {
    let fake = FakeBrowser::new();
    let urls: Vec<String> = (0..28).map(|i| format!("https://t{i}.com")).collect();
    fake.queue_tabs(urls.iter().map(|u| (1, "Tab", u.as_str())));
    // t0 closes; the first overflow tab takes its letter.
    fake.queue_tabs(urls.iter().skip(1).map(|u| (1, "Tab", u.as_str())));
    let ports = ports(&fake);
    let mut app = test_app();

    poll(&mut app, &ports, Instant::now()).await;
    assert_eq!(app.session.registry.len(), 26);
    assert!(app.session.rows(Instant::now()).iter().all(|r| r.url != "https://t26.com"));

    poll(&mut app, &ports, Instant::now()).await;
    assert_eq!(app.session.registry.resolve(letter('a')).unwrap().url, "https://t26.com");
    assert_eq!(app.session.registry.resolve(letter('b')).unwrap().url, "https://t1.com");
}

#[tokio::test]
async fn focus_time_accumulates_only_for_the_front_tab() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([(1, "Mail", "https://mail.com"), (1, "Docs", "https://docs.com")]);
    let ports = ports(&fake);
    let mut app = test_app();
    let t0 = Instant::now();

    fake.set_active("Mail", "https://mail.com");
    poll(&mut app, &ports, t0).await;
    fake.set_active("Docs", "https://docs.com");
    poll(&mut app, &ports, t0 + Duration::from_secs(5)).await;

    let rows = app.session.rows(t0 + Duration::from_secs(8));
    let mail = rows.iter().find(|r| r.title == "Mail").unwrap();
    let docs = rows.iter().find(|r| r.title == "Docs").unwrap();
    assert_eq!(mail.elapsed, Duration::from_secs(5));
    assert_eq!(docs.elapsed, Duration::from_secs(3));
    assert!(docs.is_active);
    assert!(!mail.is_active);
}

#[tokio::test]
async fn front_tab_timeout_freezes_tracker_state() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([(1, "Mail", "https://mail.com")]);
    let ports = ports(&fake);
    let mut app = test_app();
    let t0 = Instant::now();

    fake.set_active("Mail", "https://mail.com");
    poll(&mut app, &ports, t0).await;
    fake.set_active_error(Some(BrowserError::Timeout { after: Duration::from_millis(2000) }));
    let outcome = poll(&mut app, &ports, t0 + Duration::from_secs(2)).await;

    assert_eq!(outcome, PollOutcome::Synced { changed: false });
    assert!(app.snapshot_error.is_some());
    // The tracker was not told anything new, so Mail still counts as front.
    assert_eq!(app.session.tracker.current().map(|k| k.url.as_str()), Some("https://mail.com"));
}

#[tokio::test]
async fn unreadable_front_tab_keeps_previous_focus_running() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([(1, "Mail", "https://mail.com"), (1, "Docs", "https://docs.com")]);
    let ports = ports(&fake);
    let mut app = test_app();
    let t0 = Instant::now();

    fake.set_active("Mail", "https://mail.com");
    poll(&mut app, &ports, t0).await;
    fake.set_active_error(Some(BrowserError::SnapshotUnavailable {
        reason: "malformed browser output: front tab output has no separator".into(),
    }));
    let outcome = poll(&mut app, &ports, t0 + Duration::from_secs(5)).await;

    assert_eq!(outcome, PollOutcome::Synced { changed: false });
    assert!(app.snapshot_error.is_none());
    assert_eq!(app.session.tracker.current().map(|k| k.url.as_str()), Some("https://mail.com"));
    let later = t0 + Duration::from_secs(7);
    assert_eq!(app.session.tracker.elapsed("https://mail.com", later), Duration::from_secs(7));
    assert_eq!(app.session.tracker.elapsed("https://docs.com", later), Duration::ZERO);
}

#[tokio::test]
async fn failed_poll_after_close_keeps_row_order() {
    let fake = FakeBrowser::new();
    fake.queue_tabs([
        (7, "A", "https://a.com"),
        (7, "B", "https://b.com"),
        (3, "C", "https://c.com"),
    ]);
    fake.queue(Err(BrowserError::Timeout { after: Duration::from_millis(2000) }));
    let ports = ports(&fake);
    let mut app = test_app();
    let letters = |app: &tabkey::app::App| -> Vec<char> {
        app.session.rows(Instant::now()).iter().map(|r| r.letter.as_char()).collect()
    };

    poll(&mut app, &ports, Instant::now()).await;
    assert_eq!(letters(&app), vec!['a', 'b', 'c']);

    press(&mut app, &ports, KeyCode::Char('B')).await;
    assert_eq!(poll(&mut app, &ports, Instant::now()).await, PollOutcome::Unavailable);

    assert_eq!(letters(&app), vec!['a', 'c']);
}
