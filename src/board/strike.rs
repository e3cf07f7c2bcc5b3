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

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::castling::Castle;
use super::material::Color;
use super::square::Square;
use super::Board;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrikeError {
    #[error("Malformed strike: {0:?}")]
    Malformed(String),
    #[error("Not a legal move")]
    Illegal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeKind {
    Move { from: Square, to: Square },
    Castle(Castle),
}

/// A move request as typed by a player: either `e2-e4` or one of the
/// castling tokens `0-0` and `0-0-0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strike {
    text: String,
    kind: StrikeKind,
}

impl Strike {
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn kind(&self) -> StrikeKind {
        self.kind
    }
    pub fn castle(&self) -> Option<Castle> {
        match self.kind {
            StrikeKind::Castle(castle) => Some(castle),
            StrikeKind::Move { .. } => None,
        }
    }

    /// The single piece moves making up this strike when played by `color`.
    /// A castle has two legs, king first.
    pub fn legs(&self, color: Color) -> Vec<(Square, Square)> {
        match self.kind {
            StrikeKind::Move { from, to } => vec![(from, to)],
            StrikeKind::Castle(castle) => castle.legs(color).to_vec(),
        }
    }

    pub fn validate(&self, board: &Board, color: Color) -> Result<(), StrikeError> {
        let legal = match self.kind {
            StrikeKind::Move { from, to } => board.can_move(color, from, to),
            StrikeKind::Castle(castle) => board.can_castle(color, castle),
        };
        if legal {
            Ok(())
        } else {
            Err(StrikeError::Illegal)
        }
    }
}

impl FromStr for Strike {
    type Err = StrikeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let malformed = || StrikeError::Malformed(text.to_string());
        let kind = match Castle::try_from_token(text) {
            Some(castle) => StrikeKind::Castle(castle),
            None => {
                let (from, to) = text.split_once('-').ok_or_else(malformed)?;
                let from = Square::try_from_string(from).ok_or_else(malformed)?;
                let to = Square::try_from_string(to).ok_or_else(malformed)?;
                StrikeKind::Move { from, to }
            }
        };
        Ok(Self {
            text: text.to_string(),
            kind,
        })
    }
}

impl fmt::Display for Strike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
