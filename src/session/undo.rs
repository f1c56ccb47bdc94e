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

/// LIFO history of closed tab urls. Unbounded, duplicates kept.
#[derive(Debug, Default)]
pub struct ClosedTabStack {
    urls: Vec<String>,
}

impl ClosedTabStack {
    pub fn push(&mut self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!(%url, depth = self.urls.len() + 1, "archived closed tab");
        self.urls.push(url);
    }

    pub fn pop(&mut self) -> Option<String> {
        self.urls.pop()
    }

    pub fn peek(&self) -> Option<&str> {
        self.urls.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
