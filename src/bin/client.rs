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

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{IpAddr, Shutdown, TcpStream};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use duel_chess::{Action, ClientMessage, ServerMessage, Session, StrikeScript};

/// Terminal client for the chess server. Type a strike such as `e2-e4`,
/// `0-0` or `0-0-0`, `display` to see the board, or `exit` to leave.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address of the server
    #[arg(short, long, default_value = "127.0.0.1")]
    ip: IpAddr,

    /// Port of the server
    #[arg(short, long, default_value_t = 2000)]
    port: u16,

    /// File of strikes to play before reading from the terminal
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Log protocol traffic to stderr
    #[arg(short, long)]
    verbose: bool,
}

enum Event {
    Server(ServerMessage),
    Input(String),
    Disconnected,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let script = match &args.file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read strike file {}", path.display()))?;
            Some(StrikeScript::parse(&text))
        }
        None => None,
    };

    let stream = TcpStream::connect((args.ip, args.port))
        .with_context(|| format!("Server {}:{} is unavailable", args.ip, args.port))?;
    println!("Connected to the chess server {}:{}", args.ip, args.port);

    let (events, inbox) = mpsc::channel();
    let reader = BufReader::new(stream.try_clone()?);
    let server_events = events.clone();
    thread::spawn(move || listen(reader, server_events));
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if events.send(Event::Input(line)).is_err() {
                break;
            }
        }
    });

    let mut writer = stream.try_clone()?;
    let mut session = Session::new(script);
    'game: for event in inbox {
        let actions = match event {
            Event::Server(message) => session.on_server(message),
            Event::Input(line) => session.on_input(&line),
            Event::Disconnected => {
                println!("The server disconnected");
                break;
            }
        };
        for action in actions {
            match action {
                Action::Show(text) => println!("{text}"),
                Action::Send(message) => {
                    if let Err(err) = send(&mut writer, &message) {
                        warn!(%err, "could not reach the server");
                        println!("The server disconnected");
                        break 'game;
                    }
                }
                Action::Quit => break 'game,
            }
        }
    }
    if let Err(err) = stream.shutdown(Shutdown::Both) {
        debug!(%err, "shutdown failed");
    }
    Ok(())
}

/// Forwards every server message until the connection ends.
fn listen(mut reader: BufReader<TcpStream>, events: Sender<Event>) {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) if line.trim().is_empty() => continue,
            Ok(_) => match serde_json::from_str(line.trim()) {
                Ok(message) => {
                    debug!(?message, "received");
                    if events.send(Event::Server(message)).is_err() {
                        return;
                    }
                }
                Err(err) => warn!(%err, "unreadable message from the server"),
            },
            Err(err) => {
                debug!(%err, "read failed");
                break;
            }
        }
    }
    // the game loop may already be gone
    let _ = events.send(Event::Disconnected);
}

fn send(writer: &mut TcpStream, message: &ClientMessage) -> Result<()> {
    let mut line = serde_json::to_vec(message)?;
    line.push(b'\n');
    writer.write_all(&line)?;
    writer.flush()?;
    debug!(?message, "sent");
    Ok(())
}
