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

use std::io;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::warn;

use super::message::{ClientMessage, ServerMessage};
use crate::{Board, Color};

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Timed out waiting for the peer")]
    TimedOut,
    #[error("Connection closed by the peer")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A message could not be encoded for sending.
    #[error(transparent)]
    Codec(#[from] serde_json::Error),
}

/// A bidirectional message link to one client.
pub trait Channel {
    fn send(&mut self, message: &ServerMessage) -> Result<(), ChannelError>;
    /// Blocks until a message arrives, waiting at most `timeout` when one
    /// is given.
    fn recv(&mut self, timeout: Option<Duration>) -> Result<ClientMessage, ChannelError>;
    fn close(&mut self);
}

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Move deadline expired")]
    TimedOut,
    #[error("Player unreachable: {0}")]
    Unreachable(ChannelError),
}

impl From<ChannelError> for PlayerError {
    fn from(value: ChannelError) -> Self {
        match value {
            ChannelError::TimedOut => PlayerError::TimedOut,
            other => PlayerError::Unreachable(other),
        }
    }
}

/// One seat at the table: a colour, the link to the client, and the
/// deadline for the current move when it is this player's turn.
pub struct Player<C> {
    color: Color,
    channel: C,
    deadline: Option<Instant>,
    closed: bool,
}

impl<C: Channel> Player<C> {
    pub fn new(color: Color, channel: C) -> Self {
        Self {
            color,
            channel,
            deadline: None,
            closed: false,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Starts the clock for a move.
    pub fn arm(&mut self, budget: Duration) {
        self.deadline = Some(Instant::now() + budget);
    }
    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn send(&mut self, message: &ServerMessage) -> Result<(), PlayerError> {
        self.channel.send(message).map_err(PlayerError::Unreachable)
    }
    pub fn say(&mut self, text: impl Into<String>) -> Result<(), PlayerError> {
        self.send(&ServerMessage::Text(text.into()))
    }

    /// Waits for the next message, for no longer than what is left of the
    /// move deadline.
    pub fn recv(&mut self) -> Result<ClientMessage, PlayerError> {
        let timeout = match self.deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(PlayerError::TimedOut);
                }
                Some(remaining)
            }
            None => None,
        };
        Ok(self.channel.recv(timeout)?)
    }

    /// Waits for the next strike text, answering board display requests
    /// along the way.
    pub fn next_move(&mut self, board: &Board) -> Result<String, PlayerError> {
        loop {
            match self.recv()? {
                ClientMessage::Move(text) => return Ok(text),
                ClientMessage::DisplayBoard => {
                    self.send(&ServerMessage::Board(board.snapshot()))?;
                }
            }
        }
    }

    /// Whether the client can still be written to.
    pub fn probe(&mut self) -> bool {
        match self.channel.send(&ServerMessage::Heartbeat) {
            Ok(()) => true,
            Err(err) => {
                warn!(color = %self.color, %err, "heartbeat failed");
                false
            }
        }
    }

    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.channel.close();
        }
    }

    #[cfg(test)]
    pub(crate) fn channel(&self) -> &C {
        &self.channel
    }
}


#[cfg(test)]
mod tests {
    use super::scripted::{ScriptedChannel, Step};
    use crate::*;
    use std::time::Duration;

    #[test]
    fn test_expired_deadline_skips_channel() {
        let (channel, _) = ScriptedChannel::moves(["e2-e4"]);
        let mut player = Player::new(Color::White, channel);
        player.arm(Duration::ZERO);
        assert!(matches!(player.recv(), Err(PlayerError::TimedOut)));
        assert_eq!(player.channel().pending(), 1);
        player.disarm();
        assert_eq!(player.recv().unwrap(), ClientMessage::Move("e2-e4".to_string()));
    }
    #[test]
    fn test_channel_errors() {
        let (channel, _) = ScriptedChannel::new([Step::TimeOut]);
        let mut player = Player::new(Color::Black, channel);
        player.arm(Duration::from_secs(60));
        assert!(matches!(player.recv(), Err(PlayerError::TimedOut)));
        assert!(matches!(
            player.recv(),
            Err(PlayerError::Unreachable(ChannelError::Closed))
        ));
    }
    #[test]
    fn test_board_requests_are_answered() {
        let (channel, transcript) = ScriptedChannel::new([
            Step::Send(ClientMessage::DisplayBoard),
            Step::Send(ClientMessage::DisplayBoard),
            Step::Send(ClientMessage::Move("0-0".to_string())),
        ]);
        let mut player = Player::new(Color::White, channel);
        let text = player.next_move(&Board::new()).unwrap();
        assert_eq!(text, "0-0");
        assert_eq!(transcript.boards(), 2);
    }
    #[test]
    fn test_probe_and_close() {
        let (channel, transcript) = ScriptedChannel::new([]);
        let mut player = Player::new(Color::White, channel);
        assert!(player.probe());
        assert_eq!(transcript.heartbeats(), 1);
        player.close();
        player.close();
        assert_eq!(transcript.closes(), 1);
        let (channel, _) = ScriptedChannel::new([]);
        let mut player = Player::new(Color::Black, channel.deaf());
        assert!(!player.probe());
        assert!(matches!(player.say("hello"), Err(PlayerError::Unreachable(_))));
    }
}
