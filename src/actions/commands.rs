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

//! Menu and hotkey actions.
//!
//! Menus resolve keys to the action values defined here; the control loop
//! executes them. A value that needs data carries it as payload, bound when
//! the menu entry is registered.
//!
//! The queue helpers at the bottom implement the queue mutations those
//! actions perform. They are free functions over the queue so they can be
//! exercised without a player or a network connection.

use crate::{
    menu::Menu,
    model::{Playlist, Track, queue::PlayQueue},
};

/// Selections available from the numbered menus.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Browse the user's playlists.
    Playlists,
    /// Queue the user's favourite tracks.
    Favourites,
    /// Queue one specific playlist, bound at registration.
    PlayPlaylist(Playlist),
    /// Leave the submenu (or redraw the main menu) without selecting.
    Cancel,
    Quit,
}

/// Single-keystroke commands available while a track is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hotkey {
    TogglePause,
    Next,
    Previous,
    ShowQueue,
    ClearQueue,
    Radio,
    Help,
    Menu,
    Quit,
}

pub fn build_main_menu() -> Menu<MenuAction> {
    let mut menu = Menu::new();
    menu.register("1", "Playlists", MenuAction::Playlists);
    menu.register("2", "Favourite tracks", MenuAction::Favourites);
    menu.register("8", "Cancel", MenuAction::Cancel);
    menu.register("9", "Quit", MenuAction::Quit);
    menu
}

/// One numbered entry per playlist, each bound to its own playlist, plus a
/// cancel entry.
pub fn build_playlist_menu(playlists: &[Playlist]) -> Menu<MenuAction> {
    let mut menu = Menu::new();
    for (index, playlist) in playlists.iter().enumerate() {
        menu.register(
            (index + 1).to_string(),
            playlist.title.clone(),
            MenuAction::PlayPlaylist(playlist.clone()),
        );
    }
    menu.register("0", "Cancel", MenuAction::Cancel);
    menu
}

pub fn build_hotkeys() -> Menu<Hotkey> {
    let mut menu = Menu::new();
    menu.register(" ", "Pause / resume", Hotkey::TogglePause);
    menu.register("n", "Next track", Hotkey::Next);
    menu.register("p", "Previous track", Hotkey::Previous);
    menu.register("l", "List the queue", Hotkey::ShowQueue);
    menu.register("c", "Clear upcoming tracks", Hotkey::ClearQueue);
    menu.register("r", "Start track radio", Hotkey::Radio);
    menu.register("?", "Show this help", Hotkey::Help);
    menu.register("m", "Back to the menu", Hotkey::Menu);
    menu.register("q", "Quit", Hotkey::Quit);
    menu
}

/// Append tracks to the end of the queue in order.
///
/// On an empty queue the first appended track becomes the cursor, so a
/// freshly filled queue starts playing from its first track.
pub fn enqueue_tracks(queue: &mut PlayQueue<Track>, tracks: Vec<Track>) {
    for track in tracks {
        queue.append(track);
    }
}

/// Splice a batch of related tracks in directly after the cursor, keeping
/// the batch in fetched order. The cursor does not move.
///
/// Each track is inserted at the cursor, so the batch goes in back to front.
pub fn splice_related(queue: &mut PlayQueue<Track>, batch: Vec<Track>) {
    for track in batch.into_iter().rev() {
        queue.insert(track);
    }
}

/// Drop every track after the cursor. The current track keeps playing.
pub fn clear_upcoming(queue: &mut PlayQueue<Track>) {
    while let Some(id) = queue.next_id() {
        queue.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: u64) -> Track {
        Track {
            id,
            title: format!("Track {id}"),
            artist: "Artist".to_string(),
            duration: 180,
        }
    }

    fn ids(queue: &PlayQueue<Track>) -> Vec<u64> {
        queue.iter().map(|track| track.id).collect()
    }

    #[test]
    fn enqueue_fills_in_order_and_cursor_starts_at_the_first_track() {
        let mut queue = PlayQueue::new();
        enqueue_tracks(&mut queue, vec![track(1), track(2), track(3)]);

        assert_eq!(ids(&queue), vec![1, 2, 3]);
        assert_eq!(queue.current().id, 1);
    }

    #[test]
    fn splice_keeps_the_batch_in_fetched_order_after_the_cursor() {
        let mut queue = PlayQueue::new();
        enqueue_tracks(&mut queue, vec![track(1), track(2)]);
        queue.next();

        splice_related(&mut queue, vec![track(10), track(11), track(12)]);

        assert_eq!(ids(&queue), vec![1, 2, 10, 11, 12]);
        assert_eq!(queue.current().id, 2);
    }

    #[test]
    fn splice_of_an_empty_batch_changes_nothing() {
        let mut queue = PlayQueue::new();
        enqueue_tracks(&mut queue, vec![track(1)]);

        splice_related(&mut queue, vec![]);

        assert_eq!(ids(&queue), vec![1]);
        assert_eq!(queue.current().id, 1);
    }

    #[test]
    fn clear_upcoming_keeps_history_and_the_current_track() {
        let mut queue = PlayQueue::new();
        enqueue_tracks(&mut queue, (1..=5).map(track).collect());
        queue.next();
        queue.next();

        clear_upcoming(&mut queue);

        assert_eq!(ids(&queue), vec![1, 2, 3]);
        assert_eq!(queue.current().id, 3);
        assert!(!queue.has_next());
    }

    #[test]
    fn main_menu_lists_entries_in_numeric_order() {
        let menu = build_main_menu();
        let keys: Vec<_> = menu.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["1", "2", "8", "9"]);
    }

    #[test]
    fn playlist_menu_binds_each_playlist_and_orders_past_nine() {
        let playlists: Vec<Playlist> = (1..=12)
            .map(|n| Playlist {
                id: format!("uuid-{n}"),
                title: format!("Playlist {n}"),
                num_tracks: n,
            })
            .collect();

        let menu = build_playlist_menu(&playlists);

        let keys: Vec<_> = menu.entries().map(|(key, _)| key).collect();
        assert_eq!(
            keys,
            vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12"]
        );
        match menu.invoke("12") {
            Some(MenuAction::PlayPlaylist(playlist)) => assert_eq!(playlist.id, "uuid-12"),
            other => panic!("expected a bound playlist, got {other:?}"),
        }
    }

    #[test]
    fn hotkeys_resolve_single_keystrokes() {
        let hotkeys = build_hotkeys();
        assert_eq!(hotkeys.invoke(" "), Some(Hotkey::TogglePause));
        assert_eq!(hotkeys.invoke("n"), Some(Hotkey::Next));
        assert_eq!(hotkeys.invoke("q"), Some(Hotkey::Quit));
        assert_eq!(hotkeys.invoke("x"), None);
    }
}
