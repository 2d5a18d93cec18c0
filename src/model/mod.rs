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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application — the tracks
//! and playlists returned by the streaming catalog — and the playback queue
//! that holds them.

use std::fmt;

pub mod queue;

/// One playable unit, resolved to a stream URL by the catalog on demand.
///
/// Tracks compare equal when their catalog ids are equal. Two fetches of the
/// same track produce distinct values with identical ids, and queue
/// operations that search by value ([`queue::PlayQueue::seek`]) must treat
/// them as the same track.
#[derive(Debug, Clone)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist: String,
    /// Duration in whole seconds, as reported by the catalog.
    pub duration: u64,
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub num_tracks: u32,
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
