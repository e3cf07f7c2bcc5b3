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
use strum::IntoEnumIterator;

use super::square::{Rank, Square};
use super::Board;

/// Read-only picture of a board for display on the client. Row 0 is rank
/// 8 and column 0 is the a-file. White pieces are uppercase, black pieces
/// lowercase, and empty cells are a space.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct BoardSnapshot(pub [[char; 8]; 8]);

impl BoardSnapshot {
    pub fn get(&self, square: Square) -> char {
        self.0[square.rank_index()][square.file_index()]
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        let mut rows = [[' '; 8]; 8];
        for square in Square::iter() {
            if let Some(piece) = board[square] {
                rows[square.rank_index()][square.file_index()] = piece.letter();
            }
        }
        Self(rows)
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.0.iter().zip(Rank::iter()) {
            write!(f, "{rank} ")?;
            for cell in row {
                let cell = if *cell == ' ' { '.' } else { *cell };
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
