// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Keyed command menus.
//!
//! A [`Menu`] maps an input key to a display label and an action value. The
//! same abstraction backs both the numbered main menu and the
//! single-keystroke hotkey table: the control loop resolves a key with
//! [`Menu::invoke`] and executes whatever action value comes back.
//!
//! Actions are plain cloneable values, typically enum variants. An action
//! that needs an argument carries it as enum payload, captured when the
//! entry is registered — for example a playlist menu binds each entry to its
//! own `MenuAction::PlayPlaylist(playlist)`.
//!
//! Display order is key-sorted with a numeric-aware comparison: keys that
//! are entirely digits order by their numeric value ("2" before "10") and
//! come before all other keys, which order lexicographically.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Menu key with the documented numeric-aware ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MenuKey(String);

/// For an all-digit key, its magnitude as `(significant digits, digits)`.
///
/// Comparing those tuples compares arbitrary-precision values without
/// parsing: with leading zeros stripped, a longer run of digits is always
/// the larger number.
fn numeric_magnitude(key: &str) -> Option<(usize, &str)> {
    if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
        let significant = key.trim_start_matches('0');
        Some((significant.len(), significant))
    } else {
        None
    }
}

impl Ord for MenuKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (numeric_magnitude(&self.0), numeric_magnitude(&other.0)) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for MenuKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone)]
pub struct MenuEntry<A> {
    pub label: String,
    pub action: A,
}

#[derive(Debug, Clone)]
pub struct Menu<A> {
    entries: BTreeMap<MenuKey, MenuEntry<A>>,
}

impl<A> Default for Menu<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Menu<A> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry. Registering a key that already exists replaces the
    /// previous entry.
    pub fn register(&mut self, key: impl Into<String>, label: impl Into<String>, action: A) {
        self.entries.insert(
            MenuKey(key.into()),
            MenuEntry {
                label: label.into(),
                action,
            },
        );
    }

    pub fn lookup(&self, key: &str) -> Option<&MenuEntry<A>> {
        self.entries.get(&MenuKey(key.to_string()))
    }

    /// Resolve a key to its action, with the bound payload captured at
    /// registration. Returns `None` for an unknown key; nothing else
    /// happens in that case.
    pub fn invoke(&self, key: &str) -> Option<A>
    where
        A: Clone,
    {
        self.lookup(key).map(|entry| entry.action.clone())
    }

    /// `(key, label)` pairs in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.0.as_str(), entry.label.as_str()))
    }

    /// The printed menu block, one `key) label` line per entry.
    ///
    /// Lines end with `\r\n` so the block renders correctly while the
    /// terminal is in raw mode.
    pub fn render(&self) -> String {
        let mut out = String::from("\r\n");
        for (key, label) in self.entries() {
            out.push_str(&format!("\t{key})\t{label}\r\n"));
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Plain,
        Bound(String),
    }

    #[test]
    fn register_then_invoke_returns_the_bound_action() {
        let mut menu = Menu::new();
        menu.register("1", "Play", TestAction::Bound("road-trip".to_string()));

        assert_eq!(
            menu.invoke("1"),
            Some(TestAction::Bound("road-trip".to_string()))
        );
    }

    #[test]
    fn invoke_of_an_unknown_key_is_none() {
        let mut menu = Menu::new();
        menu.register("1", "Play", TestAction::Plain);

        assert_eq!(menu.invoke("2"), None);
    }

    #[test]
    fn registering_a_key_twice_keeps_only_the_second_entry() {
        let mut menu = Menu::new();
        menu.register("9", "Quit", TestAction::Plain);
        menu.register("9", "Exit", TestAction::Bound("second".to_string()));

        assert_eq!(menu.len(), 1);
        let labels: Vec<_> = menu.entries().map(|(_, label)| label).collect();
        assert_eq!(labels, vec!["Exit"]);
        assert_eq!(
            menu.invoke("9"),
            Some(TestAction::Bound("second".to_string()))
        );
    }

    #[test]
    fn numeric_keys_order_by_value_not_lexicographically() {
        let mut menu = Menu::new();
        menu.register("2", "two", TestAction::Plain);
        menu.register("10", "ten", TestAction::Plain);
        menu.register("1", "one", TestAction::Plain);

        let keys: Vec<_> = menu.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["1", "2", "10"]);
    }

    #[test]
    fn numeric_keys_come_before_letter_keys() {
        let mut menu = Menu::new();
        menu.register("q", "quit", TestAction::Plain);
        menu.register("12", "twelve", TestAction::Plain);
        menu.register("a", "letter", TestAction::Plain);
        menu.register("3", "three", TestAction::Plain);

        let keys: Vec<_> = menu.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["3", "12", "a", "q"]);
    }

    #[test]
    fn leading_zeros_compare_by_value_then_by_spelling() {
        let mut menu = Menu::new();
        menu.register("01", "zero-one", TestAction::Plain);
        menu.register("1", "one", TestAction::Plain);
        menu.register("0", "zero", TestAction::Plain);

        let keys: Vec<_> = menu.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["0", "01", "1"]);
    }

    #[test]
    fn render_lists_one_entry_per_line() {
        let mut menu = Menu::new();
        menu.register("1", "Playlists", TestAction::Plain);
        menu.register("9", "Quit", TestAction::Plain);

        let rendered = menu.render();
        assert!(rendered.contains("\t1)\tPlaylists\r\n"));
        assert!(rendered.contains("\t9)\tQuit\r\n"));
    }
}
