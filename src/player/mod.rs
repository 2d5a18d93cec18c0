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

//! Audio playback via `libmpv`.
//!
//! [`Player`] wraps an MPV handler behind the narrow surface the control
//! loop needs: load a stream URL, toggle pause, and read back elapsed time,
//! total duration and the idle flag. The control loop is the only caller,
//! so every call is a direct synchronous command against the MPV context —
//! no worker thread, no channels.

use std::time::Duration;

use anyhow::{Context, Result};

/// How a loaded URL interacts with whatever MPV is already playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMode {
    /// Stop the current item and play the new one.
    Replace,
    /// Add the new item to the end of MPV's internal playlist.
    Append,
}

impl LoadMode {
    fn as_str(self) -> &'static str {
        match self {
            LoadMode::Replace => "replace",
            LoadMode::Append => "append",
        }
    }
}

pub struct Player {
    handler: mpv::MpvHandler,
}

impl Player {
    /// Build an audio-only MPV context.
    ///
    /// The context is created idle so that finishing a track leaves MPV
    /// waiting for the next `loadfile` instead of shutting down.
    pub fn new() -> Result<Self> {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder
            .set_option("idle", "yes")
            .context("Failed to set idle mode")?;
        let handler = builder.build().context("Failed to build MPV handler")?;

        Ok(Self { handler })
    }

    /// Load a stream URL and start playing it.
    pub fn load(&mut self, url: &str, mode: LoadMode) -> Result<()> {
        self.handler
            .command(&["loadfile", url, mode.as_str()])
            .context("Failed to load stream")?;
        self.handler.set_property("pause", false)?;
        Ok(())
    }

    /// Toggle the playback state between paused and playing.
    pub fn toggle_pause(&mut self) -> Result<()> {
        self.handler.command(&["cycle", "pause"])?;
        Ok(())
    }

    /// Stop playback and drop the current item.
    pub fn stop(&mut self) -> Result<()> {
        self.handler.command(&["stop"])?;
        Ok(())
    }

    /// Elapsed playback time of the current item, if one is loaded.
    pub fn elapsed(&mut self) -> Option<Duration> {
        self.handler
            .get_property::<f64>("time-pos")
            .ok()
            .filter(|seconds| *seconds >= 0.0)
            .map(Duration::from_secs_f64)
    }

    /// Total duration of the current item, once MPV knows it.
    ///
    /// While a stream is still being opened this is `None`; it becomes
    /// `Some` as soon as MPV reports a non-zero duration.
    pub fn duration(&mut self) -> Option<Duration> {
        self.handler
            .get_property::<f64>("duration")
            .ok()
            .filter(|seconds| *seconds > 0.0)
            .map(Duration::from_secs_f64)
    }

    pub fn is_paused(&mut self) -> bool {
        self.handler.get_property("pause").unwrap_or(false)
    }

    /// Whether MPV has run out of media to play.
    pub fn is_idle(&mut self) -> bool {
        self.handler.get_property("idle-active").unwrap_or(true)
    }
}
