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

use anyhow::Result;
use clap::Parser;
use std::net::IpAddr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use duel_chess::{Arbiter, GameConfig, Lobby};

/// Referee server for one game of chess between two network clients.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    ip: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = 2000)]
    port: u16,

    /// Seconds allowed for each strike
    #[arg(long, default_value_t = 600)]
    move_timeout: u64,

    /// Seconds to wait for each player to connect
    #[arg(long, default_value_t = 60)]
    connection_timeout: u64,

    /// Log every strike
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = GameConfig::new(
        Duration::from_secs(args.move_timeout),
        Duration::from_secs(args.connection_timeout),
    );
    let lobby = Lobby::bind((args.ip, args.port), config)?;
    info!("chess server listening on {}:{}", args.ip, args.port);
    let seats = lobby.accept_pair()?;
    let result = Arbiter::new(seats, config).run();
    info!(%result, "game finished");
    Ok(())
}
