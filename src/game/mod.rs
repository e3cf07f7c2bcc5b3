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
use std::fmt;

use crate::Color;

mod arbiter;
mod client;
mod config;
mod message;
mod player;
mod rules;
mod transport;

pub use arbiter::*;
pub use client::*;
pub use config::*;
pub use message::*;
pub use player::*;
pub use rules::*;
pub use transport::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
    /// Neither player could be reached any more, so nobody wins.
    Aborted,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    CheckMate,
    TimeExpired,
    Abandoned,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    StaleMate,
    Repetition,
    NoCapture,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(color, reason) => write!(f, "{color} wins ({reason:?})"),
            GameResult::Draw(reason) => write!(f, "draw ({reason:?})"),
            GameResult::Aborted => write!(f, "aborted"),
        }
    }
}
