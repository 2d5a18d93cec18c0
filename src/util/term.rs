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

//! Raw-mode terminal output helpers.
//!
//! In raw mode a bare `\n` only moves down a line without returning the
//! carriage, and the status line is redrawn in place every tick, so all
//! output goes through these helpers.

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

/// Redraw the status line in place on the current terminal row.
pub fn status_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    queue!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(text)
    )?;
    stdout.flush()
}

/// Print one line, replacing whatever the status line left on the current
/// row.
pub fn print_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    queue!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(text),
        Print("\r\n")
    )?;
    stdout.flush()
}

/// Print a pre-rendered block whose lines are already `\r\n`-terminated.
pub fn print_block(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    queue!(stdout, MoveToColumn(0), Print(text))?;
    stdout.flush()
}
