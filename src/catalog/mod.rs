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

//! Streaming service catalog client.
//!
//! A blocking HTTP client for the streaming service's REST API: session
//! login, playlist and favourite browsing, track radio, and stream URL
//! resolution. Every call is a single bounded round-trip — the control loop
//! calls these methods directly from its tick, so none of them may hang.
//!
//! Failures surface as [`CatalogError`] values; the control loop recovers
//! from them by skipping the affected item and reporting one line to the
//! user.

mod models;

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use thiserror::Error;

use crate::{
    catalog::models::{FavouriteBody, LoginResponse, Page, PlaylistBody, StreamUrlResponse, TrackBody},
    config::AppConfig,
    model::{Playlist, Track},
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no active session")]
    NoSession,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned HTTP status {status}")]
    Api { status: u16 },
}

#[derive(Debug, Clone)]
struct Session {
    session_id: String,
    country_code: String,
    user_id: u64,
}

pub struct CatalogClient {
    http: Client,
    base: String,
    token: String,
    session: Option<Session>,
}

impl CatalogClient {
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            http,
            base: config.api_base.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            session: None,
        })
    }

    /// Establish a session with username/password credentials.
    ///
    /// On success the session id, country code and user id are retained and
    /// sent with every subsequent request.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), CatalogError> {
        let response = self
            .http
            .post(format!("{}/login/username", self.base))
            .form(&[
                ("username", username),
                ("password", password),
                ("token", self.token.as_str()),
            ])
            .send()?;
        let body: LoginResponse = check(response)?.json()?;

        log::info!("logged in as user {}", body.user_id);
        self.session = Some(Session {
            session_id: body.session_id,
            country_code: body.country_code,
            user_id: body.user_id,
        });
        Ok(())
    }

    fn session(&self) -> Result<&Session, CatalogError> {
        self.session.as_ref().ok_or(CatalogError::NoSession)
    }

    fn get(&self, path: &str, extra: &[(&str, String)]) -> Result<Response, CatalogError> {
        let session = self.session()?;
        let mut request = self.http.get(format!("{}{}", self.base, path)).query(&[
            ("sessionId", session.session_id.as_str()),
            ("countryCode", session.country_code.as_str()),
        ]);
        for (key, value) in extra {
            request = request.query(&[(*key, value.as_str())]);
        }
        check(request.send()?)
    }

    /// The logged-in user's playlists.
    pub fn user_playlists(&self) -> Result<Vec<Playlist>, CatalogError> {
        let user_id = self.session()?.user_id;
        let page: Page<PlaylistBody> = self
            .get(&format!("/users/{user_id}/playlists"), &[])?
            .json()?;
        Ok(page.items.into_iter().map(Playlist::from).collect())
    }

    /// The logged-in user's favourite tracks.
    pub fn favourite_tracks(&self) -> Result<Vec<Track>, CatalogError> {
        let user_id = self.session()?.user_id;
        let page: Page<FavouriteBody> = self
            .get(&format!("/users/{user_id}/favorites/tracks"), &[])?
            .json()?;
        Ok(page
            .items
            .into_iter()
            .map(|favourite| Track::from(favourite.item))
            .collect())
    }

    /// All tracks of a playlist, in playlist order.
    pub fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, CatalogError> {
        let page: Page<TrackBody> = self
            .get(&format!("/playlists/{playlist_id}/tracks"), &[])?
            .json()?;
        Ok(page.items.into_iter().map(Track::from).collect())
    }

    /// Tracks related to the given track. May legitimately return an empty
    /// list when the service has nothing left to recommend.
    pub fn track_radio(&self, track_id: u64, limit: usize) -> Result<Vec<Track>, CatalogError> {
        let page: Page<TrackBody> = self
            .get(
                &format!("/tracks/{track_id}/radio"),
                &[("limit", limit.to_string())],
            )?
            .json()?;
        Ok(page.items.into_iter().map(Track::from).collect())
    }

    /// Resolve a track to a playable stream URL.
    pub fn stream_url(&self, track_id: u64) -> Result<String, CatalogError> {
        let body: StreamUrlResponse = self
            .get(
                &format!("/tracks/{track_id}/streamUrl"),
                &[("soundQuality", "HIGH".to_string())],
            )?
            .json()?;
        Ok(body.url)
    }
}

fn check(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CatalogError::Api {
            status: status.as_u16(),
        })
    }
}
