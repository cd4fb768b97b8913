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

//! Line echo server executable
//!
//! ```text
//! lineecho-server [OPTIONS] <PORT>
//! ```
//!
//! Serves until interrupted with Ctrl-C. Exits with a failure status when the listener
//! cannot be created or the dispatcher hits a fatal accept error.

mod cli;

use clap::Parser;
use cli::Args;
use lineecho_service::ConnectionDispatcher;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = args.server_config();
    info!(
        port = args.port,
        idle_timeout = ?config.idle_timeout,
        max_line_length = config.max_line_length,
        terminator = %config.terminator,
        "Starting lineecho server"
    );

    let dispatcher = match ConnectionDispatcher::bind(config).await {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!(error = %e, "Unable to start server");
            return ExitCode::FAILURE;
        }
    };

    let result = dispatcher
        .serve_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Unable to listen for Ctrl-C, serving until killed");
                std::future::pending::<()>().await;
            }
        })
        .await;

    match result {
        Ok(()) => {
            info!("Server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}
