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

use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use choobar::{App, actions::events, catalog::CatalogClient, config};

const ALLOWED_LOGIN_ATTEMPTS: u32 = 3;

/// The entry point of the application.
///
/// Establishes a catalog session (refusing to continue without one), then
/// manages the terminal lifecycle around the control loop: raw mode is
/// enabled once before the loop and restored once afterwards, on every exit
/// path including errors.
fn main() -> Result<()> {
    env_logger::init();

    let config = config::load_config();

    let catalog = login(&config).context("Failed to establish a session")?;
    let mut app = App::new(config, catalog).context("Failed to initialise application")?;

    setup_terminal()?;
    let res = events::run(&mut app);
    restore_terminal();

    res.context("Application error occurred")
}

/// Prompt for credentials and log in, giving the user a bounded number of
/// attempts before aborting.
fn login(config: &config::AppConfig) -> Result<CatalogClient> {
    let mut catalog = CatalogClient::new(config)?;

    for attempt in 1..=ALLOWED_LOGIN_ATTEMPTS {
        let username = prompt("Username: ")?;
        let password = prompt("Password: ")?;

        match catalog.login(username.trim(), password.trim()) {
            Ok(()) => {
                println!("\u{266a} Successfully logged in! \u{266a}");
                return Ok(catalog);
            }
            Err(e) => {
                log::warn!("login attempt {attempt} failed: {e}");
                println!("Error logging in. Please try again.");
            }
        }
    }

    bail!("failed to log in after {ALLOWED_LOGIN_ATTEMPTS} attempts")
}

fn prompt(text: &str) -> Result<String> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line)
}

/// Prepare the terminal for the hotkey loop.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled.
fn setup_terminal() -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")
}

/// Restore the terminal to its original state.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal() {
    disable_raw_mode().ok();
    println!();
}
