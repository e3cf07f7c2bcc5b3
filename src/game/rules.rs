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

use super::DrawReason;
use crate::{Board, Color, History};

/// Plies without a capture after which the game is drawn (75 strikes each).
pub const NO_CAPTURE_PLIES: u32 = 150;

/// A position seen more often than this, with the same side having just
/// moved, draws the game.
pub const MAX_OCCURRENCES: usize = 5;

/// Counters and history behind the automatic draw rules.
#[derive(Debug, Clone, Default)]
pub struct DrawRules {
    ply: u32,
    last_capture: u32,
    history: History,
}

impl DrawRules {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Plies played since the last capture, or since the start.
    #[inline]
    pub fn plies_since_capture(&self) -> u32 {
        self.ply - self.last_capture
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Counts a newly played ply and returns its number, starting at 1.
    pub fn begin_ply(&mut self, captured: bool) -> u32 {
        self.ply += 1;
        if captured {
            self.last_capture = self.ply;
        }
        self.ply
    }

    /// Records the board `mover` just produced and reports whether the game
    /// is now drawn. The no-capture rule is checked first.
    pub fn conclude(&mut self, mover: Color, board: &Board) -> Option<DrawReason> {
        if self.plies_since_capture() >= NO_CAPTURE_PLIES {
            return Some(DrawReason::NoCapture);
        }
        self.history.push(mover, board.clone());
        if self.history.occurrences(mover, board) > MAX_OCCURRENCES {
            return Some(DrawReason::Repetition);
        }
        None
    }
}

#[cfg(test)]
impl DrawRules {
    pub(crate) fn at_ply(ply: u32) -> Self {
        Self {
            ply,
            ..Self::default()
        }
    }
}
