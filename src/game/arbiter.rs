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

#[cfg(feature = "random")]
use rand::{thread_rng, Rng};
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use super::config::{minutes, GameConfig};
use super::message::{designation, INVALID_MOVE, PROMOTION_PROMPT, YOUR_TURN};
use super::player::{Channel, Player, PlayerError};
use super::rules::DrawRules;
use super::{DrawReason, GameResult, WinReason};
use crate::{Board, Color, Pair, Played, Promotion, Square, Strike};

const PLEASE_WAIT: &str =
    "Waiting for your opponent to play... (any command except exit will be ignored)";
const PROMOTION_RETRY: &str =
    "Promotion: piece not recognised, please use the following format: queen/rook/bishop/knight";

/// Where the game stands between two steps of the arbiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AssigningColors,
    ToMove(Color),
    /// A pawn of `color` reached the far rank on `square`. The move is
    /// played but not yet announced; `description` is the announcement so
    /// far.
    AwaitingPromotion {
        color: Color,
        square: Square,
        description: String,
    },
    Over(GameResult),
}

/// A player that could not be talked to. Ends the game.
#[derive(Debug)]
struct Fault {
    color: Color,
    error: PlayerError,
}

/// Referee of a single game between two connected players. Owns the board
/// and both connections for the whole game.
pub struct Arbiter<C> {
    players: Pair<Player<C>>,
    board: Board,
    rules: DrawRules,
    config: GameConfig,
}

impl<C: Channel> Arbiter<C> {
    /// Seats two connections, picking which one plays white at random.
    #[cfg(feature = "random")]
    pub fn new(seats: [C; 2], config: GameConfig) -> Self {
        let first_is_white = thread_rng().gen_bool(0.5);
        Self::seated(seats, first_is_white, config)
    }

    pub fn seated(seats: [C; 2], first_is_white: bool, config: GameConfig) -> Self {
        let [first, second] = seats;
        let (white, black) = if first_is_white {
            (first, second)
        } else {
            (second, first)
        };
        Self {
            players: Pair::new(
                Player::new(Color::White, white),
                Player::new(Color::Black, black),
            ),
            board: Board::new(),
            rules: DrawRules::new(),
            config,
        }
    }

    /// Plays the game to the end and hangs up on both players.
    pub fn run(mut self) -> GameResult {
        info!(
            move_timeout = ?self.config.move_timeout,
            "game starts"
        );
        let mut phase = Phase::AssigningColors;
        let result = loop {
            phase = match phase {
                Phase::Over(result) => break result,
                phase => match self.step(phase) {
                    Ok(next) => next,
                    Err(fault) => Phase::Over(self.resolve(fault)),
                },
            };
        };
        for color in Color::iter() {
            self.players[color].close();
        }
        info!(%result, ply = self.rules.ply(), "game over");
        result
    }

    fn step(&mut self, phase: Phase) -> Result<Phase, Fault> {
        match phase {
            Phase::AssigningColors => {
                for color in [Color::Black, Color::White] {
                    self.tell(color, designation(color))?;
                }
                info!("colours assigned, white to move");
                Ok(Phase::ToMove(Color::White))
            }
            Phase::ToMove(color) => self.turn(color),
            Phase::AwaitingPromotion {
                color,
                square,
                description,
            } => self.promotion(color, square, description),
            Phase::Over(result) => Ok(Phase::Over(result)),
        }
    }

    fn turn(&mut self, color: Color) -> Result<Phase, Fault> {
        if !self.board.has_legal_move(color) {
            let opponent = !color;
            let (result, text) = if self.board.is_in_check(color) {
                (
                    GameResult::Win(opponent, WinReason::CheckMate),
                    format!("The {color} player is in checkmate. The {opponent} player wins !"),
                )
            } else {
                (
                    GameResult::Draw(DrawReason::StaleMate),
                    format!("The {color} player cannot move and is not in check. Stalemate !"),
                )
            };
            self.broadcast(&text);
            return Ok(Phase::Over(result));
        }

        self.tell(color, YOUR_TURN)?;
        self.tell(!color, PLEASE_WAIT)?;
        self.players[color].arm(self.config.move_timeout);
        let strike = self.read_strike(color)?;

        self.board.clear_in_passing(color);
        let played = self.board.play(color, &strike);
        let ply = self.rules.begin_ply(played.captured.is_some());
        let description = describe(ply, color, &played);
        debug!(ply, %color, %strike, "strike played");

        match played.promotion() {
            Some(square) => {
                self.tell(
                    color,
                    format!("{PROMOTION_PROMPT} {square}: queen/rook/bishop/knight"),
                )?;
                Ok(Phase::AwaitingPromotion {
                    color,
                    square,
                    description,
                })
            }
            None => Ok(self.conclude(color, description)),
        }
    }

    /// Reads until the mover submits a legal strike.
    fn read_strike(&mut self, color: Color) -> Result<Strike, Fault> {
        loop {
            let text = self.players[color]
                .next_move(&self.board)
                .map_err(|error| Fault { color, error })?;
            let checked = text
                .parse::<Strike>()
                .and_then(|strike| strike.validate(&self.board, color).map(|()| strike));
            match checked {
                Ok(strike) => return Ok(strike),
                Err(err) => {
                    debug!(%color, %err, "strike rejected");
                    self.tell(color, INVALID_MOVE)?;
                }
            }
        }
    }

    /// Handles one reply to the promotion prompt.
    fn promotion(&mut self, color: Color, square: Square, mut description: String) -> Result<Phase, Fault> {
        let text = self.players[color]
            .next_move(&self.board)
            .map_err(|error| Fault { color, error })?;
        match text.trim().parse::<Promotion>() {
            Ok(promotion) => {
                let piece = self.board.promote(square, promotion);
                debug!(%color, %square, %promotion, "pawn promoted");
                description.push_str(&format!(
                    " The pawn on {square} has been promoted to a {}.",
                    piece.role()
                ));
                Ok(self.conclude(color, description))
            }
            Err(_) => {
                self.tell(color, PROMOTION_RETRY)?;
                Ok(Phase::AwaitingPromotion {
                    color,
                    square,
                    description,
                })
            }
        }
    }

    /// Announces the finished move and applies the draw rules.
    fn conclude(&mut self, color: Color, mut description: String) -> Phase {
        self.players[color].disarm();
        if self.board.is_in_check(!color) {
            description.push_str(" Check");
        }
        self.broadcast(&description);
        match self.rules.conclude(color, &self.board) {
            Some(reason) => {
                let text = match reason {
                    DrawReason::NoCapture => {
                        "Each player has played 75 strikes without taking any piece. Draw !"
                    }
                    DrawReason::Repetition => "This game configuration has occurred 6 times. Draw !",
                    DrawReason::StaleMate => unreachable!("stalemate is found before a move"),
                };
                self.broadcast(text);
                Phase::Over(GameResult::Draw(reason))
            }
            None => Phase::ToMove(!color),
        }
    }

    /// Decides the outcome after a player stopped answering. The other
    /// player only wins if it can still be reached.
    fn resolve(&mut self, fault: Fault) -> GameResult {
        let Fault { color, error } = fault;
        let opponent = !color;
        warn!(%color, %error, "player fault");
        if !self.players[opponent].probe() {
            warn!(%opponent, "opponent unreachable too, aborting");
            return GameResult::Aborted;
        }
        match error {
            PlayerError::TimedOut => {
                let text = format!(
                    "Timeout for strikes expired - {} minutes. Game ends. Player {opponent} is the winner !",
                    minutes(self.config.move_timeout)
                );
                self.broadcast(&text);
                GameResult::Win(opponent, WinReason::TimeExpired)
            }
            PlayerError::Unreachable(_) => {
                let text = format!(
                    "Player {color} unreachable, the connection is corrupted. Game ends. You are the winner !"
                );
                if let Err(err) = self.players[opponent].say(text) {
                    warn!(%opponent, %err, "could not announce the win");
                }
                GameResult::Win(opponent, WinReason::Abandoned)
            }
        }
    }

    fn tell(&mut self, color: Color, text: impl Into<String>) -> Result<(), Fault> {
        self.players[color]
            .say(text)
            .map_err(|error| Fault { color, error })
    }

    /// Sends `text` to both players. A player that cannot be reached is
    /// noticed the next time it is asked for a move.
    fn broadcast(&mut self, text: &str) {
        for color in Color::iter() {
            if let Err(err) = self.players[color].say(text) {
                warn!(%color, %err, "broadcast failed");
            }
        }
    }
}

#[cfg(test)]
impl<C: Channel> Arbiter<C> {
    pub(crate) fn with_position(mut self, board: Board, rules: DrawRules) -> Self {
        self.board = board;
        self.rules = rules;
        self
    }
}

fn describe(ply: u32, color: Color, played: &Played) -> String {
    let Played {
        piece,
        from,
        to,
        captured,
        castle,
    } = *played;
    match (castle, captured) {
        (Some(castle), _) => format!("{ply}. {color} king castles {castle} from {from} to {to}."),
        (None, Some(captured)) => format!("{ply}. {piece} on {from} takes {captured} on {to}."),
        (None, None) => format!("{ply}. {piece} moves from {from} to {to}."),
    }
}
