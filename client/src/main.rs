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

//! Interactive echo client executable
//!
//! ```text
//! lineecho-client [OPTIONS] <HOST> <PORT>
//! ```

use clap::Parser;
use lineecho_client::{ClientConfig, EchoClient};
use lineecho_service::Terminator;
use std::process::ExitCode;
use std::time::Duration;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lineecho-client")]
#[command(author = "Hans W. Uhlig")]
#[command(version)]
#[command(about = "Interactive client for the line echo server", long_about = None)]
struct Args {
    /// Server hostname or IP address
    host: String,

    /// Server port
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    port: u16,

    /// Seconds to wait for the connection to be established
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    connect_timeout: u64,

    /// Frame lines with CRLF instead of LF
    #[arg(long)]
    crlf: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let terminator = if args.crlf {
        Terminator::CrLf
    } else {
        Terminator::Lf
    };
    let config = ClientConfig::new(args.host, args.port)
        .with_connect_timeout(Duration::from_secs(args.connect_timeout))
        .with_terminator(terminator);

    let mut client = match EchoClient::connect(config).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("lineecho-client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = client
        .run_interactive(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
    {
        eprintln!("lineecho-client: {}", e);
    }

    match client.close().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lineecho-client: error closing connection: {}", e);
            ExitCode::FAILURE
        }
    }
}
