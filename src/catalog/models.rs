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

//! Wire models for the streaming service's REST API.
//!
//! These mirror the service's JSON envelopes and convert into the domain
//! types in [`crate::model`].

use serde::Deserialize;

use crate::model::{Playlist, Track};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    pub(crate) session_id: String,
    pub(crate) country_code: String,
    pub(crate) user_id: u64,
}

/// Paged collection envelope; every listing endpoint wraps its results in
/// an `items` array.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistBody {
    pub(crate) name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TrackBody {
    pub(crate) id: u64,
    pub(crate) title: String,
    pub(crate) duration: u64,
    pub(crate) artist: ArtistBody,
}

/// Favourites are wrapped one level deeper than plain track listings.
#[derive(Debug, Deserialize)]
pub(crate) struct FavouriteBody {
    pub(crate) item: TrackBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaylistBody {
    pub(crate) uuid: String,
    pub(crate) title: String,
    pub(crate) number_of_tracks: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StreamUrlResponse {
    pub(crate) url: String,
}

impl From<TrackBody> for Track {
    fn from(body: TrackBody) -> Self {
        Track {
            id: body.id,
            title: body.title,
            artist: body.artist.name,
            duration: body.duration,
        }
    }
}

impl From<PlaylistBody> for Playlist {
    fn from(body: PlaylistBody) -> Self {
        Playlist {
            id: body.uuid,
            title: body.title,
            num_tracks: body.number_of_tracks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_page_deserializes_into_domain_tracks() {
        let json = r#"{
            "items": [
                {
                    "id": 77646437,
                    "title": "Adventure of a Lifetime",
                    "duration": 263,
                    "artist": { "name": "Coldplay" }
                }
            ]
        }"#;

        let page: Page<TrackBody> = serde_json::from_str(json).unwrap();
        let tracks: Vec<Track> = page.items.into_iter().map(Track::from).collect();

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, 77646437);
        assert_eq!(tracks[0].artist, "Coldplay");
        assert_eq!(tracks[0].to_string(), "Coldplay - Adventure of a Lifetime");
    }

    #[test]
    fn playlist_page_deserializes_camel_case_fields() {
        let json = r#"{
            "items": [
                {
                    "uuid": "7ab5d2b6-93fb-4181-a008-a1d18e2cebfa",
                    "title": "Road Trip",
                    "numberOfTracks": 42
                }
            ]
        }"#;

        let page: Page<PlaylistBody> = serde_json::from_str(json).unwrap();
        let playlist = Playlist::from(page.items.into_iter().next().unwrap());

        assert_eq!(playlist.id, "7ab5d2b6-93fb-4181-a008-a1d18e2cebfa");
        assert_eq!(playlist.num_tracks, 42);
        assert_eq!(playlist.to_string(), "Road Trip");
    }

    #[test]
    fn login_response_carries_the_session_fields() {
        let json = r#"{
            "sessionId": "ab12cd34",
            "countryCode": "NL",
            "userId": 9000001
        }"#;

        let body: LoginResponse = serde_json::from_str(json).unwrap();

        assert_eq!(body.session_id, "ab12cd34");
        assert_eq!(body.country_code, "NL");
        assert_eq!(body.user_id, 9000001);
    }
}
