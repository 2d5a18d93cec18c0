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

//! # Streaming Queue Player.
//!
//! A terminal-based playback queue navigator for a streaming music service.
//!
//! The application presents a numbered menu to pick something to play, then
//! drops into a raw-mode hotkey loop with an in-place status line. Playback
//! itself is delegated to `libmpv`; track metadata and stream URLs come from
//! the streaming service's REST API.
//!
//! ## Architecture
//!
//! Everything runs on a single thread of control:
//!
//! * The **playback queue** ([`model::queue::PlayQueue`]) is a cursor-based
//!   doubly linked list; the cursor is both the "now playing" position and
//!   the anchor for queue insertions.
//! * **Menus and hotkeys** ([`menu::Menu`]) map input keys to action values;
//!   the control loop resolves keys and executes the resulting actions.
//! * The **control loop** ([`actions::events`]) polls the keyboard without
//!   blocking, dispatches hotkeys, polls the player for progress, and sleeps
//!   a fixed tick between iterations.
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod input;
pub mod menu;
pub mod model;
pub mod player;
pub mod util;

use anyhow::Result;

use crate::{
    actions::commands::{Hotkey, MenuAction, build_hotkeys, build_main_menu},
    catalog::CatalogClient,
    config::AppConfig,
    input::Keyboard,
    menu::Menu,
    model::{Track, queue::PlayQueue},
    player::Player,
};

/// Application state.
///
/// All mutable state is owned here and mutated only by the control loop,
/// which receives the `App` by mutable reference. Nothing is shared across
/// threads, so no locking is needed.
pub struct App {
    pub config: AppConfig,

    pub catalog: CatalogClient,
    pub player: Player,

    pub queue: PlayQueue<Track>,

    pub keyboard: Keyboard,
    pub main_menu: Menu<MenuAction>,
    pub hotkeys: Menu<Hotkey>,
}

impl App {
    /// Create a new instance of application state.
    ///
    /// The catalog client must already hold a logged-in session; the control
    /// loop is never entered without one.
    pub fn new(config: AppConfig, catalog: CatalogClient) -> Result<Self> {
        Ok(Self {
            config,
            catalog,
            player: Player::new()?,
            queue: PlayQueue::new(),
            keyboard: Keyboard::new(),
            main_menu: build_main_menu(),
            hotkeys: build_hotkeys(),
        })
    }
}
