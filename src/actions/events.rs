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

//! The control loop.
//!
//! A single-threaded state machine with two outer phases:
//!
//! 1. **Menu wait** — the terminal is in line mode and the user picks a
//!    numbered selection. A selection that produces tracks fills the queue
//!    and starts playback.
//! 2. **Interactive** — each tick polls the keyboard once without blocking,
//!    dispatches a matched hotkey, advances the queue when the player runs
//!    out of media (expanding it with track radio when the queue itself is
//!    exhausted), polls the player for progress, redraws the status line,
//!    and sleeps a fixed tick interval.
//!
//! Loading a track is a bounded wait: if the player does not report a
//! duration before the configured timeout, the track is skipped. Every
//! catalog failure is likewise recovered by skipping the affected item and
//! printing one line — the loop only exits on a hotkey, a menu selection,
//! or an unrecoverable player error.

use std::thread;
use std::time::Instant;

use anyhow::Result;

use crate::{
    App,
    actions::commands::{
        Hotkey, MenuAction, build_playlist_menu, clear_upcoming, enqueue_tracks, splice_related,
    },
    catalog::CatalogError,
    model::{Playlist, Track},
    player::LoadMode,
    util::{format::format_time, term},
};

/// Why the interactive phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Menu,
    Quit,
}

/// What a numbered menu selection resolved to.
#[derive(Debug)]
enum MenuOutcome {
    Play(Vec<Track>),
    Quit,
}

/// Result of trying to (re)start playback somewhere in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Playing,
    EndOfQueue,
    Quit,
}

/// Result of one load attempt for the track at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadOutcome {
    Loaded,
    Failed,
    Quit,
}

/// Run the application until the user quits.
///
/// Alternates between the menu phase and the interactive phase. Playback
/// state never leaks across selections: the queue is cleared and the player
/// stopped whenever the interactive phase ends.
pub fn run(app: &mut App) -> Result<()> {
    loop {
        match menu_wait(app)? {
            MenuOutcome::Quit => break,
            MenuOutcome::Play(tracks) => {
                app.queue.clear();
                enqueue_tracks(&mut app.queue, tracks);

                let outcome = interactive(app)?;

                app.player.stop()?;
                app.queue.clear();
                if outcome == Outcome::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Display the main menu and block on numbered selections until one either
/// produces tracks to play or quits the application.
fn menu_wait(app: &mut App) -> Result<MenuOutcome> {
    loop {
        term::print_block(&app.main_menu.render())?;
        let selection = app.keyboard.read_line("Menu selection: ")?;

        let Some(action) = app.main_menu.invoke(&selection) else {
            term::print_line("Invalid selection.")?;
            continue;
        };

        match action {
            MenuAction::Playlists => {
                if let Some(tracks) = choose_playlist(app)? {
                    return Ok(MenuOutcome::Play(tracks));
                }
            }
            MenuAction::Favourites => match app.catalog.favourite_tracks() {
                Ok(tracks) if tracks.is_empty() => {
                    term::print_line("You have no favourite tracks.")?;
                }
                Ok(tracks) => return Ok(MenuOutcome::Play(tracks)),
                Err(e) => report_catalog_error("fetch favourite tracks", &e)?,
            },
            MenuAction::PlayPlaylist(playlist) => {
                if let Some(tracks) = fetch_playlist_tracks(app, &playlist)? {
                    return Ok(MenuOutcome::Play(tracks));
                }
            }
            MenuAction::Cancel => {}
            MenuAction::Quit => return Ok(MenuOutcome::Quit),
        }
    }
}

/// Submenu flow: list the user's playlists, let them pick one, fetch its
/// tracks. `None` means "nothing chosen, back to the main menu".
fn choose_playlist(app: &mut App) -> Result<Option<Vec<Track>>> {
    let playlists = match app.catalog.user_playlists() {
        Ok(playlists) => playlists,
        Err(e) => {
            report_catalog_error("fetch playlists", &e)?;
            return Ok(None);
        }
    };
    if playlists.is_empty() {
        term::print_line("You have no playlists.")?;
        return Ok(None);
    }

    let submenu = build_playlist_menu(&playlists);
    term::print_block(&submenu.render())?;
    let selection = app.keyboard.read_line("Playlist selection: ")?;

    match submenu.invoke(&selection) {
        Some(MenuAction::PlayPlaylist(playlist)) => fetch_playlist_tracks(app, &playlist),
        Some(_) => Ok(None),
        None => {
            term::print_line("Invalid selection.")?;
            Ok(None)
        }
    }
}

fn fetch_playlist_tracks(app: &mut App, playlist: &Playlist) -> Result<Option<Vec<Track>>> {
    match app.catalog.playlist_tracks(&playlist.id) {
        Ok(tracks) if tracks.is_empty() => {
            term::print_line("That playlist is empty.")?;
            Ok(None)
        }
        Ok(tracks) => {
            log::info!("queueing {} tracks from {playlist}", tracks.len());
            Ok(Some(tracks))
        }
        Err(e) => {
            report_catalog_error("fetch playlist tracks", &e)?;
            Ok(None)
        }
    }
}

/// The hotkey-driven playback phase. Runs one iteration per tick until the
/// user returns to the menu or quits.
fn interactive(app: &mut App) -> Result<Outcome> {
    if start_playback(app)? == Step::Quit {
        return Ok(Outcome::Quit);
    }

    // Set once a radio fetch comes back empty or fails, so an exhausted
    // queue idles instead of re-fetching every tick. Any action that gives
    // the queue new life clears it again.
    let mut radio_exhausted = false;

    loop {
        if let Some(key) = app.keyboard.poll_key()? {
            match app.hotkeys.invoke(&key.to_string()) {
                Some(Hotkey::TogglePause) => app.player.toggle_pause()?,
                Some(Hotkey::Next) => {
                    radio_exhausted = false;
                    if play_next(app)? == Step::Quit {
                        return Ok(Outcome::Quit);
                    }
                }
                Some(Hotkey::Previous) => {
                    radio_exhausted = false;
                    if play_previous(app)? == Step::Quit {
                        return Ok(Outcome::Quit);
                    }
                }
                Some(Hotkey::ShowQueue) => show_queue(app)?,
                Some(Hotkey::ClearQueue) => {
                    clear_upcoming(&mut app.queue);
                    radio_exhausted = false;
                    term::print_line("Cleared upcoming tracks.")?;
                }
                Some(Hotkey::Radio) => {
                    radio_exhausted = false;
                    if radio_expand(app)? == Step::Quit {
                        return Ok(Outcome::Quit);
                    }
                }
                Some(Hotkey::Help) => show_hotkeys(app)?,
                Some(Hotkey::Menu) => return Ok(Outcome::Menu),
                Some(Hotkey::Quit) => return Ok(Outcome::Quit),
                None => {}
            }
        }

        // The player going idle means the current item finished (or never
        // loaded): continue with the queue, or grow it when it is spent.
        if app.player.is_idle() && !app.queue.is_empty() {
            let step = if app.queue.has_next() {
                play_next(app)?
            } else if !radio_exhausted {
                let step = radio_expand(app)?;
                if step == Step::EndOfQueue {
                    radio_exhausted = true;
                }
                step
            } else {
                Step::EndOfQueue
            };
            if step == Step::Quit {
                return Ok(Outcome::Quit);
            }
        }

        if !app.queue.is_empty() {
            let elapsed = app.player.elapsed();
            let duration = app.player.duration();
            if let (Some(elapsed), Some(duration)) = (elapsed, duration) {
                let paused = if app.player.is_paused() {
                    " [paused]"
                } else {
                    ""
                };
                let line = format!(
                    "\u{266a} {}  {}/{}{paused}",
                    app.queue.current(),
                    format_time(elapsed.as_secs()),
                    format_time(duration.as_secs()),
                );
                term::status_line(&line)?;
            }
        }

        thread::sleep(app.config.tick());
    }
}

/// Load the track at the cursor, falling forward through the queue past any
/// track that fails.
fn start_playback(app: &mut App) -> Result<Step> {
    if app.queue.is_empty() {
        return Ok(Step::EndOfQueue);
    }
    match load_current(app)? {
        LoadOutcome::Loaded => Ok(Step::Playing),
        LoadOutcome::Quit => Ok(Step::Quit),
        LoadOutcome::Failed => play_next(app),
    }
}

/// Advance the cursor and play the new current track, skipping past tracks
/// that fail to resolve or load.
fn play_next(app: &mut App) -> Result<Step> {
    while app.queue.next().is_some() {
        match load_current(app)? {
            LoadOutcome::Loaded => return Ok(Step::Playing),
            LoadOutcome::Quit => return Ok(Step::Quit),
            LoadOutcome::Failed => {}
        }
    }
    term::print_line("End of queue.")?;
    Ok(Step::EndOfQueue)
}

/// Step the cursor back and play that track. At the head of the queue the
/// cursor stays put; a failed load falls forward again.
fn play_previous(app: &mut App) -> Result<Step> {
    if app.queue.prev().is_none() {
        term::print_line("Already at the start of the queue.")?;
        return Ok(Step::Playing);
    }
    match load_current(app)? {
        LoadOutcome::Loaded => Ok(Step::Playing),
        LoadOutcome::Quit => Ok(Step::Quit),
        LoadOutcome::Failed => play_next(app),
    }
}

/// Grow the queue with tracks related to the current one and continue
/// playing into them.
fn radio_expand(app: &mut App) -> Result<Step> {
    if app.queue.is_empty() {
        term::print_line("Queue is empty.")?;
        return Ok(Step::EndOfQueue);
    }

    let seed = app.queue.current().clone();
    log::info!("expanding the queue with radio for track {}", seed.id);
    match app.catalog.track_radio(seed.id, app.config.radio_batch) {
        Ok(batch) if batch.is_empty() => {
            term::print_line("No more tracks.")?;
            Ok(Step::EndOfQueue)
        }
        Ok(batch) => {
            term::print_line(&format!("Queued {} related tracks.", batch.len()))?;
            splice_related(&mut app.queue, batch);
            play_next(app)
        }
        Err(e) => {
            report_catalog_error("fetch related tracks", &e)?;
            Ok(Step::EndOfQueue)
        }
    }
}

/// Resolve the current track's stream URL and load it, waiting (bounded)
/// for the player to accept it.
fn load_current(app: &mut App) -> Result<LoadOutcome> {
    let track = app.queue.current().clone();

    let url = match app.catalog.stream_url(track.id) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("could not resolve a stream URL for track {}: {e}", track.id);
            term::print_line(&format!("Could not resolve {track}, skipping."))?;
            return Ok(LoadOutcome::Failed);
        }
    };

    if let Err(e) = app.player.load(&url, LoadMode::Replace) {
        log::error!("player rejected track {}: {e:?}", track.id);
        term::print_line(&format!("Could not start {track}, skipping."))?;
        return Ok(LoadOutcome::Failed);
    }

    wait_for_duration(app, &track)
}

/// The loading phase: poll until the player reports a duration, give up at
/// the deadline. The quit hotkey stays live so a stuck stream cannot trap
/// the user.
fn wait_for_duration(app: &mut App, track: &Track) -> Result<LoadOutcome> {
    let deadline = Instant::now() + app.config.load_timeout();
    term::status_line(&format!("Loading {track}..."))?;

    loop {
        if app.player.duration().is_some() {
            term::print_line(&format!("Now playing: {track}"))?;
            return Ok(LoadOutcome::Loaded);
        }
        if Instant::now() >= deadline {
            log::warn!(
                "track {} reported no duration within {:?}",
                track.id,
                app.config.load_timeout()
            );
            term::print_line(&format!("{track} timed out while loading, skipping."))?;
            return Ok(LoadOutcome::Failed);
        }
        if let Some(key) = app.keyboard.poll_key()? {
            if app.hotkeys.invoke(&key.to_string()) == Some(Hotkey::Quit) {
                return Ok(LoadOutcome::Quit);
            }
        }
        thread::sleep(app.config.tick());
    }
}

/// Print the queue head-to-tail with a marker at the cursor.
fn show_queue(app: &mut App) -> Result<()> {
    if app.queue.is_empty() {
        term::print_line("Queue is empty.")?;
        return Ok(());
    }
    let cursor = app.queue.cursor_index();
    term::print_line("")?;
    for (index, track) in app.queue.iter().enumerate() {
        let marker = if Some(index) == cursor { " * " } else { "   " };
        term::print_line(&format!("{marker}{track}"))?;
    }
    term::print_line("")?;
    Ok(())
}

fn show_hotkeys(app: &App) -> Result<()> {
    term::print_line("")?;
    for (key, label) in app.hotkeys.entries() {
        let key = if key == " " { "space" } else { key };
        term::print_line(&format!("\t{key})\t{label}"))?;
    }
    term::print_line("")?;
    Ok(())
}

fn report_catalog_error(what: &str, err: &CatalogError) -> Result<()> {
    log::warn!("failed to {what}: {err}");
    term::print_line(&format!("Could not {what}: {err}"))?;
    Ok(())
}
