// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Time limits for one game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// How long the mover has to submit a legal strike (and a promotion
    /// choice, if one is needed).
    pub move_timeout: Duration,
    /// How long the first player waits for an opponent to connect.
    pub connection_timeout: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            move_timeout: Duration::from_secs(10 * 60),
            connection_timeout: Duration::from_secs(60),
        }
    }
}

impl GameConfig {
    pub fn new(move_timeout: Duration, connection_timeout: Duration) -> Self {
        Self {
            move_timeout,
            connection_timeout,
        }
    }
}

/// Whole minutes in `duration`, as shown to players.
pub fn minutes(duration: Duration) -> u64 {
    duration.as_secs() / 60
}
