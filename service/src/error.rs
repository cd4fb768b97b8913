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

//! Error types for the line echo service

use lineecho_linecodec::CodecError;
use std::net::SocketAddr;
use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Line echo service error types
#[derive(Debug, Error)]
pub enum ServiceError {
    /// I/O error from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Framing error from the codec layer
    #[error("Codec error: {0}")]
    Codec(CodecError),

    /// The peer closed the stream before a complete line arrived
    #[error("Connection closed")]
    Closed,

    /// No complete line arrived within the allotted time
    #[error("Operation timed out")]
    TimedOut,

    /// The listening socket could not be created, bound or put into listening mode
    #[error("Failed to bind listener on {address}: {source}")]
    Bind {
        /// Address the listener was meant to own
        address: SocketAddr,
        /// Underlying socket error
        source: std::io::Error,
    },

    /// Accepting a connection failed with a non transient error
    #[error("Failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<CodecError> for ServiceError {
    fn from(error: CodecError) -> Self {
        match error {
            CodecError::Io(error) => ServiceError::Io(error),
            other => ServiceError::Codec(other),
        }
    }
}

impl ServiceError {
    /// Check if the error is the idle timeout outcome
    pub fn is_timeout(&self) -> bool {
        matches!(self, ServiceError::TimedOut)
    }

    /// Check if the error ends a single connection
    pub fn is_connection_error(&self) -> bool {
        matches!(self, ServiceError::Closed | ServiceError::Io(_))
    }

    /// Check if the error is fatal to the dispatcher
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ServiceError::Bind { .. } | ServiceError::Accept(_) | ServiceError::InvalidConfig(_)
        )
    }
}
