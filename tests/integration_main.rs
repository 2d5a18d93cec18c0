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

use choobar::actions::commands::{
    MenuAction, build_main_menu, build_playlist_menu, clear_upcoming, enqueue_tracks,
    splice_related,
};
use choobar::model::queue::PlayQueue;
use choobar::model::{Playlist, Track};

/// Helper to create a test track
fn track(id: u64) -> Track {
    Track {
        id,
        title: format!("Track {id}"),
        artist: format!("Artist {id}"),
        duration: 200 + id,
    }
}

fn queue_ids(queue: &PlayQueue<Track>) -> Vec<u64> {
    queue.iter().map(|t| t.id).collect()
}

#[test]
fn test_playing_through_a_playlist_to_the_end() {
    let mut queue = PlayQueue::new();
    enqueue_tracks(&mut queue, vec![track(1), track(2), track(3)]);

    // Playback starts at the first track
    assert_eq!(queue.current().id, 1);

    // Advancing walks the whole queue in order, then reports the end
    assert_eq!(queue.next().map(|t| t.id), Some(2));
    assert_eq!(queue.next().map(|t| t.id), Some(3));
    assert_eq!(queue.next(), None);
    assert_eq!(queue.current().id, 3);
}

#[test]
fn test_radio_expansion_at_the_end_of_the_queue() {
    let mut queue = PlayQueue::new();
    enqueue_tracks(&mut queue, vec![track(1), track(2)]);
    queue.next();
    assert!(!queue.has_next());

    // The radio batch lands after the cursor in fetched order, and playback
    // continues into it
    splice_related(&mut queue, vec![track(10), track(11), track(12)]);
    assert_eq!(queue_ids(&queue), vec![1, 2, 10, 11, 12]);
    assert_eq!(queue.next().map(|t| t.id), Some(10));

    // A later expansion seeds from the new current track
    assert_eq!(queue.current().id, 10);
}

#[test]
fn test_clearing_upcoming_tracks_keeps_the_playing_track() {
    let mut queue = PlayQueue::new();
    enqueue_tracks(&mut queue, vec![track(1), track(2), track(3), track(4)]);
    queue.next();

    clear_upcoming(&mut queue);

    assert_eq!(queue_ids(&queue), vec![1, 2]);
    assert_eq!(queue.current().id, 2);
    assert!(!queue.has_next());

    // Previous still works into the retained history
    assert_eq!(queue.prev().map(|t| t.id), Some(1));
}

#[test]
fn test_seek_returns_to_an_already_queued_track() {
    let mut queue = PlayQueue::new();
    enqueue_tracks(&mut queue, vec![track(1), track(2), track(3)]);
    queue.fastforward();

    // Same id, freshly constructed value: tracks match by id
    assert!(queue.seek(&track(2)));
    assert_eq!(queue.current().id, 2);

    // An id that was never queued leaves the cursor untouched
    assert!(!queue.seek(&track(99)));
    assert_eq!(queue.current().id, 2);
}

#[test]
fn test_main_menu_selection_and_invalid_keys() {
    let menu = build_main_menu();

    assert_eq!(menu.invoke("9"), Some(MenuAction::Quit));
    assert_eq!(menu.invoke("7"), None);
    assert_eq!(menu.invoke(""), None);
}

#[test]
fn test_playlist_submenu_binds_playlists_in_display_order() {
    let playlists: Vec<Playlist> = (1..=11)
        .map(|n| Playlist {
            id: format!("uuid-{n}"),
            title: format!("Playlist {n}"),
            num_tracks: n * 3,
        })
        .collect();

    let menu = build_playlist_menu(&playlists);

    // Numeric ordering holds past single digits
    let keys: Vec<_> = menu.entries().map(|(key, _)| key).collect();
    let nine = keys.iter().position(|k| *k == "9").unwrap();
    let ten = keys.iter().position(|k| *k == "10").unwrap();
    assert!(nine < ten);

    match menu.invoke("10") {
        Some(MenuAction::PlayPlaylist(playlist)) => {
            assert_eq!(playlist.title, "Playlist 10");
        }
        other => panic!("expected a bound playlist, got {other:?}"),
    }
    assert_eq!(menu.invoke("0"), Some(MenuAction::Cancel));
}
