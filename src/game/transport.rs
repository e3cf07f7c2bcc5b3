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

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::config::{minutes, GameConfig};
use super::message::{ClientMessage, ServerMessage};
use super::player::{Channel, ChannelError};

const ACCEPT_POLL: Duration = Duration::from_millis(50);

/// A client connection carrying one JSON message per line.
pub struct TcpChannel {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
    peer: SocketAddr,
}

impl TcpChannel {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        stream.set_nonblocking(false)?;
        let peer = stream.peer_addr()?;
        let writer = stream.try_clone()?;
        Ok(Self {
            reader: BufReader::new(stream),
            writer,
            peer,
        })
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }
}

impl Channel for TcpChannel {
    fn send(&mut self, message: &ServerMessage) -> Result<(), ChannelError> {
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        Ok(())
    }

    fn recv(&mut self, timeout: Option<Duration>) -> Result<ClientMessage, ChannelError> {
        // a zero read timeout is rejected by the socket
        if timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(ChannelError::TimedOut);
        }
        self.reader.get_ref().set_read_timeout(timeout)?;
        let mut line = String::new();
        loop {
            match self.reader.read_line(&mut line) {
                Ok(0) => return Err(ChannelError::Closed),
                Ok(_) if line.trim().is_empty() => line.clear(),
                Ok(_) => return Ok(ClientMessage::decode(line.trim())),
                Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(ChannelError::TimedOut)
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn close(&mut self) {
        if let Err(err) = self.writer.shutdown(Shutdown::Both) {
            debug!(peer = %self.peer, %err, "shutdown failed");
        }
    }
}

/// Listening socket gathering the two players of a game.
pub struct Lobby {
    listener: TcpListener,
    config: GameConfig,
}

impl Lobby {
    pub fn bind(addr: impl ToSocketAddrs, config: GameConfig) -> Result<Self> {
        let listener = TcpListener::bind(addr).context("cannot bind the game server")?;
        listener.set_nonblocking(true)?;
        Ok(Self { listener, config })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for two clients, each within the connection timeout. The first
    /// client is told to wait, and is sent away if nobody joins.
    pub fn accept_pair(&self) -> Result<[TcpChannel; 2]> {
        let timeout = self.config.connection_timeout;
        info!(addr = ?self.local_addr().ok(), "waiting for players");
        let Some(mut first) = self.accept_within(timeout)? else {
            bail!("no player joined within {timeout:?}");
        };
        info!(peer = %first.peer(), "first player connected");
        first.send(&ServerMessage::from(format!(
            "Waiting for another player... {} minute timeout",
            minutes(timeout)
        )))?;

        let Some(mut second) = self.accept_within(timeout)? else {
            warn!("second player never joined");
            let farewell =
                "You have been disconnected from the server, no other player joined the game";
            if let Err(err) = first.send(&ServerMessage::from(farewell)) {
                warn!(%err, "could not notify the first player");
            }
            first.close();
            bail!("only one player joined within {timeout:?}");
        };
        info!(peer = %second.peer(), "second player connected");

        let ready = format!(
            "Another player has joined the game, be ready to play. You have {} minutes allocated to each strike.",
            minutes(self.config.move_timeout)
        );
        for channel in [&mut first, &mut second] {
            channel.send(&ServerMessage::from(ready.as_str()))?;
        }
        Ok([first, second])
    }

    fn accept_within(&self, timeout: Duration) -> Result<Option<TcpChannel>> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.listener.accept() {
                Ok((stream, _)) => return Ok(Some(TcpChannel::new(stream)?)),
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    if Instant::now() >= deadline {
                        return Ok(None);
                    }
                    thread::sleep(ACCEPT_POLL);
                }
                Err(err) => return Err(err).context("accept failed"),
            }
        }
    }
}
