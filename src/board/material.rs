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
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut, Not};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

use Color::{Black, White};

impl Color {
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

/// One value per colour.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
    pub fn into_tuple(self) -> (T, T) {
        self.0
    }
}

impl<T: Hash> Hash for Pair<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.white().hash(state);
        self.black().hash(state);
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

/// The type of a piece, without colour or rule flags.
#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Role {
    /// Lowercase letter used in board snapshots.
    pub const fn letter(&self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        }
    }
}

/// A piece on the board along with the flags the rules need to remember
/// about it.
///
/// Flags only ever move toward "has moved" and "cannot castle". The only
/// way to get a piece with fresh flags back is to construct a new one,
/// which is what promotion does.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    Pawn {
        color: Color,
        has_moved: bool,
        in_passing: bool,
    },
    Knight {
        color: Color,
    },
    Bishop {
        color: Color,
    },
    Rook {
        color: Color,
        can_castle: bool,
    },
    Queen {
        color: Color,
    },
    King {
        color: Color,
        can_castle: bool,
    },
}

impl Piece {
    pub const WK: Self = Self::king(White);
    pub const WQ: Self = Self::queen(White);
    pub const WR: Self = Self::rook(White);
    pub const WB: Self = Self::bishop(White);
    pub const WN: Self = Self::knight(White);
    pub const WP: Self = Self::pawn(White);

    pub const BK: Self = Self::king(Black);
    pub const BQ: Self = Self::queen(Black);
    pub const BR: Self = Self::rook(Black);
    pub const BB: Self = Self::bishop(Black);
    pub const BN: Self = Self::knight(Black);
    pub const BP: Self = Self::pawn(Black);

    #[inline]
    pub const fn pawn(color: Color) -> Self {
        Self::Pawn {
            color,
            has_moved: false,
            in_passing: false,
        }
    }
    #[inline]
    pub const fn knight(color: Color) -> Self {
        Self::Knight { color }
    }
    #[inline]
    pub const fn bishop(color: Color) -> Self {
        Self::Bishop { color }
    }
    #[inline]
    pub const fn rook(color: Color) -> Self {
        Self::Rook {
            color,
            can_castle: true,
        }
    }
    #[inline]
    pub const fn queen(color: Color) -> Self {
        Self::Queen { color }
    }
    #[inline]
    pub const fn king(color: Color) -> Self {
        Self::King {
            color,
            can_castle: true,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        match *self {
            Self::Pawn { color, .. }
            | Self::Knight { color }
            | Self::Bishop { color }
            | Self::Rook { color, .. }
            | Self::Queen { color }
            | Self::King { color, .. } => color,
        }
    }

    #[inline]
    pub fn role(&self) -> Role {
        match self {
            Self::Pawn { .. } => Role::Pawn,
            Self::Knight { .. } => Role::Knight,
            Self::Bishop { .. } => Role::Bishop,
            Self::Rook { .. } => Role::Rook,
            Self::Queen { .. } => Role::Queen,
            Self::King { .. } => Role::King,
        }
    }

    /// Snapshot letter: uppercase for white, lowercase for black.
    pub fn letter(&self) -> char {
        let letter = self.role().letter();
        match self.color() {
            White => letter.to_ascii_uppercase(),
            Black => letter,
        }
    }

    /// Direction in which the piece's move table is read. Only pawns care:
    /// their table is written with forward as positive.
    #[inline]
    pub fn direction(&self) -> isize {
        match *self {
            Self::Pawn { color: White, .. } => -1,
            Self::Pawn { color: Black, .. } => 1,
            _ => 1,
        }
    }

    #[inline]
    pub fn is_king(&self) -> bool {
        matches!(*self, Self::King { .. })
    }
    #[inline]
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Self::Pawn { .. })
    }
    #[inline]
    pub fn is_rook(&self) -> bool {
        matches!(*self, Self::Rook { .. })
    }

    pub fn has_moved(&self) -> bool {
        matches!(*self, Self::Pawn { has_moved: true, .. })
    }
    pub fn in_passing(&self) -> bool {
        matches!(*self, Self::Pawn { in_passing: true, .. })
    }
    pub fn can_castle(&self) -> bool {
        matches!(
            *self,
            Self::Rook {
                can_castle: true,
                ..
            } | Self::King {
                can_castle: true,
                ..
            }
        )
    }

    /// Updates the flags of a piece that moves `offset_y` rank indices.
    pub(crate) fn mark_moved(&mut self, offset_y: isize) {
        match self {
            Self::Pawn {
                has_moved,
                in_passing,
                ..
            } => {
                *has_moved = true;
                *in_passing = offset_y.abs() == 2;
            }
            Self::Rook { can_castle, .. } | Self::King { can_castle, .. } => {
                *can_castle = false;
            }
            _ => {}
        }
    }

    pub(crate) fn clear_in_passing(&mut self) {
        if let Self::Pawn { in_passing, .. } = self {
            *in_passing = false;
        }
    }

    /// Whether two pieces are the same for repetition purposes: same role
    /// and colour, same en-passant eligibility and same castling rights.
    /// Whether a pawn has moved at all does not matter.
    pub fn equivalent(&self, other: &Piece) -> bool {
        self.color() == other.color()
            && self.role() == other.role()
            && self.in_passing() == other.in_passing()
            && self.can_castle() == other.can_castle()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color(), self.role())
    }
}

/// Pieces a pawn may be promoted to.
#[derive(Debug, Serialize, Deserialize, Display, EnumString, Clone, Copy, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Builds the replacement piece. A promoted rook never started in a
    /// corner, so it cannot castle.
    pub fn to_piece(self, color: Color) -> Piece {
        match self {
            Promotion::Queen => Piece::queen(color),
            Promotion::Rook => Piece::Rook {
                color,
                can_castle: false,
            },
            Promotion::Bishop => Piece::bishop(color),
            Promotion::Knight => Piece::knight(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn test_opponent() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!!Color::Black, Color::Black);
    }
    #[test]
    fn test_letters() {
        assert_eq!(Piece::WK.letter(), 'K');
        assert_eq!(Piece::BN.letter(), 'n');
        assert_eq!(Piece::WP.letter(), 'P');
        assert_eq!(Piece::BQ.letter(), 'q');
    }
    #[test]
    fn test_pawn_flags() {
        let mut pawn = Piece::WP;
        pawn.mark_moved(-2);
        assert!(pawn.has_moved());
        assert!(pawn.in_passing());
        pawn.clear_in_passing();
        assert!(!pawn.in_passing());
        assert!(pawn.has_moved());
    }
    #[test]
    fn test_castling_flags_are_lost() {
        let mut rook = Piece::BR;
        assert!(rook.can_castle());
        rook.mark_moved(1);
        assert!(!rook.can_castle());
        assert!(!Piece::BR.equivalent(&rook));
    }
    #[test]
    fn test_equivalence_ignores_has_moved() {
        let mut pawn = Piece::BP;
        pawn.mark_moved(1);
        assert!(pawn.equivalent(&Piece::BP));
        assert!(!pawn.equivalent(&Piece::WP));
    }
    #[test]
    fn test_promotion_parsing() {
        assert_eq!("queen".parse::<Promotion>().ok(), Some(Promotion::Queen));
        assert_eq!("knight".parse::<Promotion>().ok(), Some(Promotion::Knight));
        assert!("king".parse::<Promotion>().is_err());
        assert!(!Promotion::Rook.to_piece(Color::White).can_castle());
        assert_eq!(Promotion::Bishop.to_string(), "bishop");
    }
}
