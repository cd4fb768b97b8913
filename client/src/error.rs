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

//! Client error types

use lineecho_service::ServiceError;
use std::time::Duration;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached
    #[error("Unable to connect to {address}: {source}")]
    Connect {
        /// Address the client tried
        address: String,
        /// Underlying socket error
        source: std::io::Error,
    },

    /// Connection attempt did not finish in time
    #[error("Connection timeout after {0:?}")]
    ConnectTimeout(Duration),

    /// Failure on the connection to the server
    #[error(transparent)]
    Transport(#[from] ServiceError),

    /// Failure on the local input or output
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Check if the server closed the connection
    pub fn is_closed(&self) -> bool {
        matches!(self, ClientError::Transport(ServiceError::Closed))
    }
}
