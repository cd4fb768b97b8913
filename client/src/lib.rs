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

//! # Lineecho Client
//!
//! Interactive client for the line echo server: every line typed is sent to the server
//! and the echoed answer is printed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lineecho_client::{ClientConfig, EchoClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = EchoClient::connect(ClientConfig::new("localhost", 7000)).await?;
//!     let answer = client.echo("hello").await?;
//!     println!("{}", answer);
//!     client.close().await?;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;

pub use client::{EchoClient, PROMPT};
pub use config::ClientConfig;
pub use error::{ClientError, Result};
