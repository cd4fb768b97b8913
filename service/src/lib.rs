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

//! Line Echo Service
//!
//! A connection oriented line protocol service: a dispatcher accepts TCP connections and
//! hands each one to an independent session task that echoes every line it receives
//! until the peer goes idle, disconnects or fails.
//!
//! # Architecture
//!
//! ```text
//! ConnectionDispatcher
//!     ↓ (one detached task per connection)
//! IdleEchoSession ──→ ActiveSessionCounter
//!     ↓
//! LineTransport → LineCodec
//! ```
//!
//! # Example
//!
//! ```no_run
//! use lineecho_service::{ConnectionDispatcher, ServerConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::for_port(7000).with_idle_timeout(Duration::from_secs(30));
//!     let dispatcher = ConnectionDispatcher::bind(config).await?;
//!     dispatcher.serve().await?;
//!     Ok(())
//! }
//! ```

mod config;
mod counter;
mod dispatcher;
mod error;
mod session;
mod transport;
mod types;

pub use config::{
    DEFAULT_BACKLOG, DEFAULT_IDLE_NOTICE, DEFAULT_IDLE_TIMEOUT, DEFAULT_PORT, ServerConfig,
};
pub use counter::{ActiveSessionCounter, SessionGuard};
pub use dispatcher::{ConnectionDispatcher, create_listener};
pub use error::{Result, ServiceError};
pub use session::{IdleEchoSession, SessionConfig};
pub use transport::{LineTransport, TransportStats};
pub use types::{CloseReason, SessionId, SessionState, SessionSummary};

pub use lineecho_linecodec::{CodecError, Line, LineCodec, Terminator};
