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

//! Non-blocking keyboard input.
//!
//! With the terminal in raw mode, keystrokes arrive unbuffered and without
//! echo — exactly what the hotkey loop needs, and exactly wrong for typing
//! a menu selection. [`Keyboard::poll_key`] covers the first case;
//! [`Keyboard::read_line`] temporarily leaves raw mode so the user can see
//! what they type, then switches back before returning.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

pub struct Keyboard;

impl Keyboard {
    pub fn new() -> Self {
        Self
    }

    /// Return the next pressed character without blocking, or `None` when
    /// no key is waiting.
    pub fn poll_key(&self) -> Result<Option<char>> {
        if event::poll(Duration::ZERO).context("Failed to poll for input")? {
            if let Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                ..
            }) = event::read().context("Failed to read input event")?
            {
                return Ok(Some(c));
            }
        }
        Ok(None)
    }

    /// Prompt for a full line of input in echoing line mode.
    ///
    /// Raw mode is disabled for the duration of the call and re-enabled
    /// before returning, whether or not reading succeeded.
    pub fn read_line(&self, prompt: &str) -> Result<String> {
        disable_raw_mode().context("Failed to leave raw mode")?;

        let line = (|| -> Result<String> {
            print!("{prompt}");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin()
                .read_line(&mut line)
                .context("Failed to read input line")?;
            Ok(line)
        })();

        enable_raw_mode().context("Failed to restore raw mode")?;
        Ok(line?.trim().to_string())
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}
