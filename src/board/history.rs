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

use std::ops::Index;

use super::material::Color;
use super::Board;

/// The board as it stood right after `mover` played.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub mover: Color,
    pub board: Board,
}

/// Append-only record of every position reached during a game. The
/// starting position is not recorded.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

#[allow(clippy::len_without_is_empty)]
impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mover: Color, board: Board) {
        self.snapshots.push(Snapshot { mover, board });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// How many recorded snapshots by `mover` are equivalent to `board`.
    pub fn occurrences(&self, mover: Color, board: &Board) -> usize {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.mover == mover && snapshot.board.equivalent(board))
            .count()
    }
}

impl Index<usize> for History {
    type Output = Snapshot;
    fn index(&self, index: usize) -> &Self::Output {
        self.snapshots.index(index)
    }
}
