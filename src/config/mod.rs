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

//! Application configuration.
//!
//! This module manages the application configuration file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "choobar";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    /// Base URL of the streaming service's REST API.
    pub api_base: String,
    /// Application token sent with the login request.
    pub api_token: String,
    /// Control loop tick interval in milliseconds.
    pub tick_ms: u64,
    /// How long a track may take to report a duration before it is skipped.
    pub load_timeout_secs: u64,
    /// Number of related tracks fetched per radio expansion.
    pub radio_batch: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            api_base: "https://api.tidalhq.com/v1".to_string(),
            api_token: String::new(),
            tick_ms: 250,
            load_timeout_secs: 10,
            radio_batch: 10,
        }
    }
}

impl AppConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}
