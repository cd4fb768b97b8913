//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Command line interface

use clap::Parser;
use lineecho_service::{DEFAULT_BACKLOG, ServerConfig, Terminator};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Highest port accepted on the command line; ports above it are ephemeral.
pub const MAX_LISTEN_PORT: u16 = 49151;

#[derive(Parser, Debug)]
#[command(name = "lineecho-server")]
#[command(author = "Hans W. Uhlig")]
#[command(version)]
#[command(about = "Line oriented TCP echo server", long_about = None)]
pub struct Args {
    /// Listening port, between 1 and 49151
    #[arg(value_parser = clap::value_parser!(u16).range(1..=MAX_LISTEN_PORT as i64))]
    pub port: u16,

    /// Seconds a session may wait for a complete line before it is closed
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub idle_timeout: u64,

    /// Line buffer capacity in bytes, terminator included
    #[arg(long, default_value_t = 1024)]
    pub max_line_length: usize,

    /// Listen backlog
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    pub backlog: u32,

    /// Frame lines with CRLF instead of LF
    #[arg(long)]
    pub crlf: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Build the server configuration for these arguments
    pub fn server_config(&self) -> ServerConfig {
        let terminator = if self.crlf {
            Terminator::CrLf
        } else {
            Terminator::Lf
        };

        ServerConfig::new(SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port)))
            .with_idle_timeout(Duration::from_secs(self.idle_timeout))
            .with_max_line_length(self.max_line_length)
            .with_backlog(self.backlog)
            .with_terminator(terminator)
    }
}
