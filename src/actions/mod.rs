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

//! Application logic, menu actions, and the control loop.
//!
//! # Organization
//!
//! * [`commands`]: the action values the menus dispatch, the standard menu
//!   and hotkey tables, and the queue-mutating helpers they rely on.
//! * [`events`]: the control loop that drives menus, hotkeys, the playback
//!   queue and the player.

pub mod commands;
pub mod events;
