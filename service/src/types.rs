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

//! Core types for the line echo service

use std::fmt;
use std::time::Duration;

/// Unique identifier for a session (monotonically increasing, never reused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a new session ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying u64 value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Session state (stored as atomic u8 for lock-free state queries)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionState {
    /// Session is reading and echoing lines
    Active = 0,
    /// Session has released its connection
    Closed = 1,
}

impl SessionState {
    /// Convert from u8 (for atomic operations)
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Active,
            _ => Self::Closed,
        }
    }

    /// Convert to u8 (for atomic operations)
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if the session is in its terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Why a session moved to [`SessionState::Closed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseReason {
    /// No complete line arrived within the idle timeout; the idle notice was sent
    IdleTimeout,
    /// The peer closed its side of the stream
    PeerClosed,
    /// A read or write failed; no notice was sent
    Fault(String),
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdleTimeout => write!(f, "idle timeout"),
            Self::PeerClosed => write!(f, "peer closed"),
            Self::Fault(reason) => write!(f, "fault: {}", reason),
        }
    }
}

/// Outcome of a finished session
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// Session ID
    pub id: SessionId,
    /// Why the session ended
    pub reason: CloseReason,
    /// Lines echoed back to the peer
    pub lines_echoed: u64,
    /// Total bytes received
    pub bytes_received: u64,
    /// Total bytes sent, idle notice included
    pub bytes_sent: u64,
    /// Session lifetime
    pub duration: Duration,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {{ reason: {}, echoed: {}, rx: {}, tx: {}, duration: {:?} }}",
            self.id,
            self.reason,
            self.lines_echoed,
            self.bytes_received,
            self.bytes_sent,
            self.duration
        )
    }
}
