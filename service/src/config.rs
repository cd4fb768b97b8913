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

//! Server configuration

use crate::SessionConfig;
use bytes::BytesMut;
use lineecho_linecodec::{DEFAULT_MAX_LINE_LENGTH, LineCodec, Terminator};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio_util::codec::Encoder;

/// Port of the classic echo service
pub const DEFAULT_PORT: u16 = 7;

/// Listen queue depth for connections awaiting accept
pub const DEFAULT_BACKLOG: u32 = 1024;

/// How long a session waits for the next complete line
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Message sent to a peer before an idle session is closed
pub const DEFAULT_IDLE_NOTICE: &str = "Timeout - closing connection.";

/// Server configuration
///
/// This structure contains all configuration options for the echo server.
/// Use the builder pattern methods to customize the configuration.
///
/// # Example
///
/// ```
/// use lineecho_service::ServerConfig;
/// use lineecho_linecodec::Terminator;
/// use std::time::Duration;
///
/// let config = ServerConfig::for_port(7000)
///     .with_idle_timeout(Duration::from_secs(30))
///     .with_terminator(Terminator::CrLf);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to
    pub bind_address: SocketAddr,

    /// Listen backlog handed to the operating system
    pub backlog: u32,

    /// Timeout for idle sessions
    ///
    /// Measured across one whole line read; a session that receives no complete line
    /// within this duration is sent the idle notice and closed.
    pub idle_timeout: Duration,

    /// Line buffer capacity, terminator included
    pub max_line_length: usize,

    /// Terminator used for reading and writing lines
    pub terminator: Terminator,

    /// Text sent before closing an idle session
    pub idle_notice: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            backlog: DEFAULT_BACKLOG,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            terminator: Terminator::default(),
            idle_notice: DEFAULT_IDLE_NOTICE.to_string(),
        }
    }
}

impl ServerConfig {
    /// Create a new configuration with the given bind address
    ///
    /// All other settings will use their default values.
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            ..Default::default()
        }
    }

    /// Create a configuration listening on `port` on every IPv4 interface
    pub fn for_port(port: u16) -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    /// Set the listen backlog
    pub fn with_backlog(mut self, backlog: u32) -> Self {
        self.backlog = backlog;
        self
    }

    /// Set the idle timeout duration
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Set the line buffer capacity
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    /// Set the line terminator
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Set the idle notice text
    pub fn with_idle_notice(mut self, notice: impl Into<String>) -> Self {
        self.idle_notice = notice.into();
        self
    }

    /// Per-session settings derived from this configuration
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            idle_timeout: self.idle_timeout,
            max_line_length: self.max_line_length,
            terminator: self.terminator,
            idle_notice: self.idle_notice.clone(),
        }
    }

    /// Validate the configuration
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.backlog == 0 {
            return Err("backlog must be greater than 0".to_string());
        }

        if self.idle_timeout.is_zero() {
            return Err("idle_timeout must be greater than 0".to_string());
        }

        if self.max_line_length < 2 {
            return Err("max_line_length must be at least 2".to_string());
        }

        // The notice must survive framing with the configured terminator.
        LineCodec::new(self.max_line_length, self.terminator)
            .encode(self.idle_notice.as_str(), &mut BytesMut::new())
            .map_err(|e| format!("idle_notice cannot be sent: {}", e))?;

        Ok(())
    }
}
