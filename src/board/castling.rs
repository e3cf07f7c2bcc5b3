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

use super::material::{Color, Piece};
use super::square::{File, Rank, Square};
use super::Board;

use File::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Castle {
    KingSide,
    QueenSide,
}

impl Castle {
    /// The strike text that requests this castle.
    pub const fn token(&self) -> &'static str {
        match self {
            Castle::KingSide => "0-0",
            Castle::QueenSide => "0-0-0",
        }
    }
    pub fn try_from_token(token: &str) -> Option<Self> {
        match token {
            "0-0" => Some(Castle::KingSide),
            "0-0-0" => Some(Castle::QueenSide),
            _ => None,
        }
    }

    #[inline]
    pub const fn king_src(&self, color: Color) -> Square {
        Square::new(FileE, Rank::back_rank(color))
    }
    #[inline]
    pub const fn king_dest(&self, color: Color) -> Square {
        match self {
            Castle::KingSide => Square::new(FileG, Rank::back_rank(color)),
            Castle::QueenSide => Square::new(FileC, Rank::back_rank(color)),
        }
    }
    #[inline]
    pub const fn rook_src(&self, color: Color) -> Square {
        match self {
            Castle::KingSide => Square::new(FileH, Rank::back_rank(color)),
            Castle::QueenSide => Square::new(FileA, Rank::back_rank(color)),
        }
    }
    #[inline]
    pub const fn rook_dest(&self, color: Color) -> Square {
        match self {
            Castle::KingSide => Square::new(FileF, Rank::back_rank(color)),
            Castle::QueenSide => Square::new(FileD, Rank::back_rank(color)),
        }
    }

    /// King leg first, then rook leg.
    pub fn legs(&self, color: Color) -> [(Square, Square); 2] {
        [
            (self.king_src(color), self.king_dest(color)),
            (self.rook_src(color), self.rook_dest(color)),
        ]
    }
}

impl fmt::Display for Castle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Castle::KingSide => write!(f, "kingside"),
            Castle::QueenSide => write!(f, "queenside"),
        }
    }
}

impl Board {
    /// Whether `color` may castle on the given side. Every condition must
    /// hold, and they are checked in order:
    ///
    /// * king and corner rook of `color` are in place with castling rights
    /// * every cell between them is empty
    /// * the king is not in check
    /// * the rook may legally make its own leg
    /// * the king may legally take its first step toward the rook
    /// * the king is not in check once it has moved two squares
    pub fn can_castle(&self, color: Color, castle: Castle) -> bool {
        let king_src = castle.king_src(color);
        let rook_src = castle.rook_src(color);
        let in_place = |square: Square, expected: fn(&Piece) -> bool| match self[square] {
            Some(piece) => piece.color() == color && expected(&piece) && piece.can_castle(),
            None => false,
        };
        if !in_place(king_src, Piece::is_king) || !in_place(rook_src, Piece::is_rook) {
            return false;
        }
        if king_src.between(rook_src).any(|square| self.is_occupied(square)) {
            return false;
        }
        if self.is_in_check(color) {
            return false;
        }
        if !self.can_move(color, rook_src, castle.rook_dest(color)) {
            return false;
        }
        let king_dest = castle.king_dest(color);
        let Some(step) = (king_dest - king_src).to_unit() else {
            return false;
        };
        let Some(first_step) = king_src + step else {
            return false;
        };
        if !self.can_move(color, king_src, first_step) {
            return false;
        }
        let mut hypothetical = self.clone();
        hypothetical.simulate(king_src, king_dest);
        !hypothetical.is_in_check(color)
    }
}
