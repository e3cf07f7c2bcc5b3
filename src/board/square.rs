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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use strum_macros::EnumIter;

use super::material::Color;

use Color::*;

/// A cell of the 8x8 grid. Cells are laid out rank 8 first, so the index
/// of a square matches the row-major order of a `BoardSnapshot`.
#[rustfmt::skip]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Square {
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
}

#[rustfmt::skip]
use Square::{
    A8, B8, C8, D8, E8, F8, G8, H8,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A1, B1, C1, D1, E1, F1, G1, H1,
};

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    #[rustfmt::skip]
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Square; 64] = [
            A8, B8, C8, D8, E8, F8, G8, H8,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A1, B1, C1, D1, E1, F1, G1, H1,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    /// Parses a two character cell name such as `a2`.
    #[inline]
    pub fn try_from_string(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let f = chars.next()?;
        let r = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::try_from_chars(f, r)
    }
    #[inline]
    pub fn try_from_chars(f: char, r: char) -> Option<Self> {
        let file = File::try_from_char(f)?;
        let rank = Rank::try_from_char(r)?;
        Some(Self::new(file, rank))
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn file_index(&self) -> usize {
        self.to_index() % 8
    }
    #[inline]
    pub const fn rank_index(&self) -> usize {
        self.to_index() / 8
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.file_index())
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.rank_index())
    }

    /// Cells strictly between `self` and `to` when both lie on a common
    /// rank, file or diagonal. Empty otherwise.
    pub fn between(self, to: Square) -> impl Iterator<Item = Square> {
        let step = (to - self).to_unit();
        let mut next = step.and_then(|step| self + step);
        std::iter::from_fn(move || {
            let square = next.filter(|&square| square != to)?;
            // `step` points from self to `to`, so we reach `to` before
            // leaving the board
            next = step.and_then(|step| square + step);
            Some(square)
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA,
    FileB,
    FileC,
    FileD,
    FileE,
    FileF,
    FileG,
    FileH,
}

use File::{FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' => Some(FileA),
            'b' => Some(FileB),
            'c' => Some(FileC),
            'd' => Some(FileD),
            'e' => Some(FileE),
            'f' => Some(FileF),
            'g' => Some(FileG),
            'h' => Some(FileH),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const VALUES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        write!(f, "{}", VALUES[self.to_index()])
    }
}

impl Add<isize> for File {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

impl Sub for File {
    type Output = isize;

    fn sub(self, rhs: Self) -> Self::Output {
        self.to_index() as isize - rhs.to_index() as isize
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank8,
    Rank7,
    Rank6,
    Rank5,
    Rank4,
    Rank3,
    Rank2,
    Rank1,
}

use Rank::{Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8};

impl Rank {
    /// The rank a colour's king and rooks start on.
    #[inline]
    pub const fn back_rank(color: Color) -> Self {
        match color {
            White => Rank1,
            Black => Rank8,
        }
    }
    /// The rank on which a pawn of `color` gets promoted.
    #[inline]
    pub const fn last_rank(color: Color) -> Self {
        match color {
            White => Rank8,
            Black => Rank1,
        }
    }
    #[inline]
    pub const fn pawn_rank(color: Color) -> Self {
        match color {
            White => Rank2,
            Black => Rank7,
        }
    }
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [Rank8, Rank7, Rank6, Rank5, Rank4, Rank3, Rank2, Rank1];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", 8 - self.to_index())
    }
}

impl Add<isize> for Rank {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

impl Sub for Rank {
    type Output = isize;

    fn sub(self, rhs: Self) -> Self::Output {
        self.to_index() as isize - rhs.to_index() as isize
    }
}

/// A relative move. `x` counts files to the right, `y` counts rank
/// indices downward (from rank 8 toward rank 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    pub fn to_unit(self) -> Option<Self> {
        let (x, y) = match (self.x, self.y) {
            (0, 0) => return None,
            (x, y) if x == 0 || y == 0 || x.abs() == y.abs() => (x.signum(), y.signum()),
            _ => return None,
        };
        Some(Self { x, y })
    }

    /// Flips the vertical component when `direction` is negative.
    #[inline]
    pub const fn oriented(self, direction: isize) -> Self {
        Self::new(self.x, self.y * direction)
    }
}

impl Mul<isize> for Offset {
    type Output = Self;
    fn mul(self, rhs: isize) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = (self.file() + rhs.x)?;
        let rank = (self.rank() + rhs.y)?;
        Some(Square::new(file, rank))
    }
}

impl Add<&Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: &Offset) -> Self::Output {
        self + *rhs
    }
}

impl Sub for Square {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(self.file() - rhs.file(), self.rank() - rhs.rank())
    }
}
