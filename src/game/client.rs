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

//! Player side of the protocol, independent of sockets and terminals.
//!
//! A `Session` turns what the server says and what the user types into
//! `Action`s for the front end to carry out. A `StrikeScript` lets a client
//! replay its strikes from a file of alternating white and black lines,
//! one strike per line, optionally followed by the promotion choice
//! (`a7-a8 queen`). Blank lines, `//` comments and `draw` lines are
//! skipped.

use std::collections::VecDeque;
use strum::IntoEnumIterator;
use tracing::debug;

use super::message::{
    designation, ClientMessage, ServerMessage, INVALID_MOVE, PROMOTION_PROMPT, YOUR_TURN,
};
use crate::Color;

const BAD_SCRIPT: &str = "Incorrect move in file, please check. Disconnection processing...";

/// One line of a strike file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedStrike {
    pub strike: String,
    pub promotion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrikeScript {
    entries: Vec<ScriptedStrike>,
}

impl StrikeScript {
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("//") && !line.starts_with("draw"))
            .filter_map(|line| {
                let mut words = line.split_whitespace();
                let strike = words.next()?.to_string();
                let promotion = words.next().map(str::to_string);
                Some(ScriptedStrike { strike, promotion })
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The strikes belonging to `color`: white plays the odd lines, black
    /// the even ones.
    pub fn for_color(&self, color: Color) -> VecDeque<ScriptedStrike> {
        self.entries
            .iter()
            .skip(color.to_index())
            .step_by(2)
            .cloned()
            .collect()
    }
}

/// A line typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(ClientMessage),
    Exit,
}

impl Command {
    /// `display` asks for the board, `exit` leaves, anything else is sent
    /// as a strike. Blank lines are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" => None,
            "exit" => Some(Command::Exit),
            "display" => Some(Command::Send(ClientMessage::DisplayBoard)),
            text => Some(Command::Send(ClientMessage::Move(text.to_string()))),
        }
    }
}

/// What the front end should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Show(String),
    Send(ClientMessage),
    Quit,
}

/// State of one client for the length of a game.
#[derive(Debug, Default)]
pub struct Session {
    color: Option<Color>,
    script: Option<StrikeScript>,
    pending: VecDeque<ScriptedStrike>,
    promotion: Option<String>,
    scripted_in_flight: bool,
}

impl Session {
    pub fn new(script: Option<StrikeScript>) -> Self {
        Self {
            script,
            ..Self::default()
        }
    }

    #[inline]
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Strikes from the script still to be played.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn on_server(&mut self, message: ServerMessage) -> Vec<Action> {
        let text = match message {
            ServerMessage::Heartbeat => {
                debug!("heartbeat");
                return Vec::new();
            }
            ServerMessage::Board(snapshot) => return vec![Action::Show(snapshot.to_string())],
            ServerMessage::Text(text) => text,
        };
        let mut actions = vec![Action::Show(text.clone())];
        if self.color.is_none() {
            if let Some(color) = Color::iter().find(|color| text == designation(*color)) {
                self.color = Some(color);
                if let Some(script) = &self.script {
                    self.pending = script.for_color(color);
                }
            }
            return actions;
        }
        if text == YOUR_TURN {
            if let Some(next) = self.pending.pop_front() {
                self.promotion = next.promotion;
                self.scripted_in_flight = true;
                actions.push(Action::Send(ClientMessage::Move(next.strike)));
            }
        } else if text.starts_with(PROMOTION_PROMPT) {
            if let Some(choice) = self.promotion.take() {
                actions.push(Action::Send(ClientMessage::Move(choice)));
            }
        } else if text == INVALID_MOVE && self.scripted_in_flight {
            actions.push(Action::Show(BAD_SCRIPT.to_string()));
            actions.push(Action::Quit);
        } else {
            self.scripted_in_flight = false;
        }
        actions
    }

    pub fn on_input(&mut self, line: &str) -> Vec<Action> {
        match Command::parse(line) {
            Some(Command::Send(message)) => vec![Action::Send(message)],
            Some(Command::Exit) => vec![Action::Quit],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    const GAME: &str = "// fool's mate\nf2-f3\ne7-e5\n\ng2-g4\nd8-h4\n";

    fn strike(text: &str) -> Action {
        Action::Send(ClientMessage::Move(text.to_string()))
    }

    #[test]
    fn test_script_is_split_by_color() {
        let script = StrikeScript::parse(GAME);
        assert_eq!(script.len(), 4);
        let white: Vec<String> = script
            .for_color(Color::White)
            .into_iter()
            .map(|entry| entry.strike)
            .collect();
        assert_eq!(white, ["f2-f3", "g2-g4"]);
        let black = script.for_color(Color::Black);
        assert_eq!(black[1].strike, "d8-h4");
        let script = StrikeScript::parse("a7-a8 queen\ndraw\n");
        assert_eq!(script.for_color(Color::White)[0].promotion.as_deref(), Some("queen"));
        assert!(script.for_color(Color::Black).is_empty());
    }
    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("  "), None);
        assert_eq!(Command::parse("exit"), Some(Command::Exit));
        assert_eq!(
            Command::parse("display"),
            Some(Command::Send(ClientMessage::DisplayBoard))
        );
        assert_eq!(
            Command::parse(" e2-e4\n"),
            Some(Command::Send(ClientMessage::Move("e2-e4".to_string())))
        );
    }
    #[test]
    fn test_typed_input() {
        let mut session = Session::new(None);
        assert_eq!(session.on_input("display"), [Action::Send(ClientMessage::DisplayBoard)]);
        assert_eq!(session.on_input("0-0"), [strike("0-0")]);
        assert_eq!(session.on_input("exit"), [Action::Quit]);
        assert!(session.on_input("").is_empty());
    }
    #[test]
    fn test_server_messages_are_shown() {
        let mut session = Session::new(None);
        assert!(session.on_server(ServerMessage::Heartbeat).is_empty());
        let board = Board::new().snapshot();
        assert_eq!(
            session.on_server(ServerMessage::Board(board)),
            [Action::Show(board.to_string())]
        );
        let actions = session.on_server(ServerMessage::from(designation(Color::Black)));
        assert_eq!(actions, [Action::Show(designation(Color::Black))]);
        assert_eq!(session.color(), Some(Color::Black));
        // nothing scripted, the user answers the prompt
        assert_eq!(
            session.on_server(ServerMessage::from(YOUR_TURN)),
            [Action::Show(YOUR_TURN.to_string())]
        );
    }
    #[test]
    fn test_script_plays_on_each_turn() {
        let mut session = Session::new(Some(StrikeScript::parse(GAME)));
        session.on_server(ServerMessage::from(designation(Color::White)));
        assert_eq!(session.pending(), 2);
        let actions = session.on_server(ServerMessage::from(YOUR_TURN));
        assert_eq!(actions[1], strike("f2-f3"));
        session.on_server(ServerMessage::from("1. white pawn moves from f2 to f3."));
        // the opponent's moves are only shown
        let actions = session.on_server(ServerMessage::from("2. black pawn moves from e7 to e5."));
        assert_eq!(actions.len(), 1);
        let actions = session.on_server(ServerMessage::from(YOUR_TURN));
        assert_eq!(actions[1], strike("g2-g4"));
        assert_eq!(session.pending(), 0);
        let actions = session.on_server(ServerMessage::from(YOUR_TURN));
        assert_eq!(actions.len(), 1);
    }
    #[test]
    fn test_script_answers_promotion() {
        let mut session = Session::new(Some(StrikeScript::parse("a7-a8 knight\nh7-h6\n")));
        session.on_server(ServerMessage::from(designation(Color::White)));
        session.on_server(ServerMessage::from(YOUR_TURN));
        let prompt = format!("{PROMOTION_PROMPT} a8: queen/rook/bishop/knight");
        let actions = session.on_server(ServerMessage::from(prompt));
        assert_eq!(actions[1], strike("knight"));
    }
    #[test]
    fn test_rejected_scripted_strike_quits() {
        let mut session = Session::new(Some(StrikeScript::parse("e2-e5\n")));
        session.on_server(ServerMessage::from(designation(Color::White)));
        session.on_server(ServerMessage::from(YOUR_TURN));
        let actions = session.on_server(ServerMessage::from(INVALID_MOVE));
        assert_eq!(actions.last(), Some(&Action::Quit));
        // a typed strike that is rejected is only shown
        let mut session = Session::new(None);
        session.on_server(ServerMessage::from(designation(Color::White)));
        session.on_server(ServerMessage::from(YOUR_TURN));
        assert_eq!(
            session.on_server(ServerMessage::from(INVALID_MOVE)),
            [Action::Show(INVALID_MOVE.to_string())]
        );
    }
}
