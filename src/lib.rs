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

//! Rules and turn management for a two-player networked game of chess.
//!
//! The `board` half knows the rules: which moves are legal, when a king
//! is in check, how castling and promotion work. The `game` half runs one
//! game between two connected players: it assigns colours, alternates
//! turns under a per-move time limit, applies the draw rules and reports
//! a `GameResult`.

mod board;
mod game;

pub use board::*;
pub use game::*;
