// Copyright 2023 Tobin Edwards
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

//! Chess board enforcing the standard rules of play
//!
//! A _board_ holds the contents of the 64 squares and decides whether a
//! requested move is legal. The following features are supported:
//!
//! [x] Sliding and jumping movement with path clearance
//! [x] Captures, including en passant
//! [x] Castling on either side
//! [x] Promotion (the replacement piece is chosen by the caller)
//! [x] Check, checkmate and stalemate detection
//! [x] Position history for the repetition rule
//! [ ] Chess960 back ranks
//! [ ] Insufficient material
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square
//!   on an 8-by-8 board. The 8 rows and 8 columns on a board
//!   are represented by `Rank` (`Rank1` .. `Rank8`) and `File`
//!   ('FileA' .. 'FileH') respectively. The difference between two
//!   squares is an `Offset`, and adding an `Offset` to a square yields
//!   another square as long as it stays on the board.
//!
//! * A `Piece` is a closed set of variants, one per role, each carrying
//!   its `Color` and only the flags the rules need for that role: pawns
//!   remember whether they have moved and whether they may be taken en
//!   passant, kings and rooks remember whether they may still castle.
//!   `Role` is the flag-free type of a piece and `Promotion` lists the
//!   four roles a pawn may become.
//!
//! * `Board` owns the squares. Cloning a board yields a fully independent
//!   copy, which is how the legality check looks one move ahead: the move
//!   is simulated on a clone and rejected if it leaves the mover's king
//!   in check.
//!
//! * A `Strike` is a move as typed by a player (`e2-e4`, `0-0`, `0-0-0`).
//!   It is validated against a board and then played, which returns a
//!   `Played` report describing what happened.
//!
//! * `History` records the board after every move so that repeated
//!   positions can be counted. Two boards are equivalent when every square
//!   holds the same role and colour with the same en passant and castling
//!   flags.
//!

use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;

mod castling;
mod history;
mod material;
mod moves;
mod snapshot;
mod square;
mod strike;

pub use castling::*;
pub use history::*;
pub use material::*;
pub use moves::*;
pub use snapshot::*;
pub use square::*;
pub use strike::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Squares([Option<Piece>; 64]);

impl Squares {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Squares {
    type Output = Option<Piece>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Squares {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: Squares,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Self {
        const BACK_RANK: [fn(Color) -> Piece; 8] = [
            Piece::rook,
            Piece::knight,
            Piece::bishop,
            Piece::queen,
            Piece::king,
            Piece::bishop,
            Piece::knight,
            Piece::rook,
        ];
        let mut board = Self::empty();
        for color in Color::iter() {
            for (file, piece) in File::iter().zip(BACK_RANK) {
                board.squares[Square::new(file, Rank::back_rank(color))] = Some(piece(color));
                board.squares[Square::new(file, Rank::pawn_rank(color))] = Some(Piece::pawn(color));
            }
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            squares: Squares::empty(),
        }
    }

    #[inline]
    pub fn contents(&self, square: Square) -> Option<Piece> {
        self.squares[square]
    }
    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.squares[square].is_none()
    }
    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.squares[square].is_some()
    }

    /// Every piece of `color` with its square.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| match self.squares[square] {
            Some(piece) if piece.color() == color => Some((square, piece)),
            _ => None,
        })
    }

    /// The square of the king of `color`.
    ///
    /// # Panics
    ///
    /// Panics if there is no such king. Every board reachable through play
    /// has exactly one king per colour.
    pub fn king(&self, color: Color) -> Square {
        self.pieces(color)
            .find(|(_, piece)| piece.is_king())
            .map(|(square, _)| square)
            .unwrap_or_else(|| panic!("Board::king - no {color} king on the board"))
    }

    /// Ends the en passant window of every pawn of `color`. Called at the
    /// start of that colour's move, one round after a double step.
    pub fn clear_in_passing(&mut self, color: Color) {
        for square in Square::iter() {
            if let Some(piece) = self.squares[square].as_mut() {
                if piece.color() == color {
                    piece.clear_in_passing();
                }
            }
        }
    }

    /// Plays a strike that has already been validated for `color`.
    ///
    /// # Panics
    ///
    /// Panics if the strike's starting square is empty. Run
    /// `Strike::validate` first.
    pub fn play(&mut self, color: Color, strike: &Strike) -> Played {
        let legs = strike.legs(color);
        let (from, to) = legs[0];
        let piece = self.squares[from]
            .unwrap_or_else(|| panic!("Board::play - no piece on {from} for {strike}"));
        let mut captured = None;
        for (from, to) in legs {
            captured = captured.or(self.simulate(from, to));
        }
        Played {
            piece,
            from,
            to,
            captured,
            castle: strike.castle(),
        }
    }

    /// Replaces the pawn on `square` with the chosen piece.
    ///
    /// # Panics
    ///
    /// Panics if `square` is empty. Only call it with the square reported
    /// by `Played::promotion`.
    pub fn promote(&mut self, square: Square, promotion: Promotion) -> Piece {
        let color = self.squares[square]
            .map(|piece| piece.color())
            .unwrap_or_else(|| panic!("Board::promote - no pawn on {square}"));
        let piece = promotion.to_piece(color);
        self.squares[square] = Some(piece);
        piece
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.into()
    }

    /// Whether both boards hold equivalent pieces on every square.
    pub fn equivalent(&self, other: &Board) -> bool {
        Square::iter().all(|square| match (self.squares[square], other.squares[square]) {
            (Some(a), Some(b)) => a.equivalent(&b),
            (None, None) => true,
            _ => false,
        })
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

/// What happened when a strike was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Played {
    /// The piece as it stood before moving. For a castle, the king.
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub castle: Option<Castle>,
}

impl Played {
    /// The square of a pawn that reached the far rank and must be promoted.
    pub fn promotion(&self) -> Option<Square> {
        let last_rank = Rank::last_rank(self.piece.color());
        (self.piece.is_pawn() && self.to.rank() == last_rank).then_some(self.to)
    }
}

#[cfg(test)]
impl Board {
    pub fn set_contents(mut self, square: Square, value: Option<Piece>) -> Self {
        self.squares[square] = value;
        self
    }
}
