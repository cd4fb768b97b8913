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

//! Idle echo session
//!
//! One [`IdleEchoSession`] owns one connection for its whole life:
//!
//! - **Active**: read a line (bounded by the idle timeout) and write it back, repeatedly.
//! - **Closed**: entered on idle timeout (after sending the idle notice), on peer close or
//!   on any read or write failure (no notice). The stream is shut down and released.
//!
//! The live session counter is incremented on entry to Active and decremented exactly
//! once when the session ends, on every path.

use crate::config::{DEFAULT_IDLE_NOTICE, DEFAULT_IDLE_TIMEOUT};
use crate::{
    ActiveSessionCounter, CloseReason, LineTransport, ServiceError, SessionId, SessionState,
    SessionSummary,
};
use lineecho_linecodec::{DEFAULT_MAX_LINE_LENGTH, LineCodec, Terminator};
use metrics::{counter, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::Instant;
use tracing::{debug, info, instrument, trace};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Max time to wait for the next complete line
    pub idle_timeout: Duration,
    /// Line buffer capacity, terminator included
    pub max_line_length: usize,
    /// Terminator for both directions
    pub terminator: Terminator,
    /// Sent to the peer before closing an idle session
    pub idle_notice: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            terminator: Terminator::default(),
            idle_notice: DEFAULT_IDLE_NOTICE.to_string(),
        }
    }
}

impl SessionConfig {
    /// Codec matching this configuration
    pub fn codec(&self) -> LineCodec {
        LineCodec::new(self.max_line_length, self.terminator)
    }
}

/// Echo session bound to a single connection
pub struct IdleEchoSession<S> {
    id: SessionId,
    transport: LineTransport<S>,
    counter: Arc<ActiveSessionCounter>,
    config: SessionConfig,
    state: AtomicU8,
    lines_echoed: u64,
}

impl<S> IdleEchoSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Create a session taking ownership of `stream`
    pub fn new(
        id: SessionId,
        stream: S,
        counter: Arc<ActiveSessionCounter>,
        config: SessionConfig,
    ) -> Self {
        Self {
            id,
            transport: LineTransport::new(stream, config.codec()),
            counter,
            config,
            state: AtomicU8::new(SessionState::Active.as_u8()),
            lines_echoed: 0,
        }
    }

    /// Session ID
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state(&self, new_state: SessionState) {
        self.state.store(new_state.as_u8(), Ordering::Release);
    }

    /// Run the session to completion
    ///
    /// Session level failures never escape; they end the session and are reported in
    /// the returned summary.
    #[instrument(name = "session", skip(self), fields(session_id = %self.id))]
    pub async fn run(mut self) -> SessionSummary {
        let started_at = Instant::now();
        let guard = self.counter.enter();
        self.set_state(SessionState::Active);
        counter!("lineecho.sessions.opened").increment(1);
        info!(active = guard.active_on_entry(), "Session started");

        let reason = self.echo_loop().await;

        self.close().await;
        let remaining = guard.release();

        let stats = self.transport.stats();
        let summary = SessionSummary {
            id: self.id,
            reason,
            lines_echoed: self.lines_echoed,
            bytes_received: stats.bytes_read,
            bytes_sent: stats.bytes_written,
            duration: started_at.elapsed(),
        };
        histogram!("lineecho.sessions.duration").record(summary.duration.as_secs_f64());
        info!(
            reason = %summary.reason,
            echoed = summary.lines_echoed,
            active = remaining,
            "Session closed"
        );
        summary
    }

    async fn echo_loop(&mut self) -> CloseReason {
        loop {
            let line = match self
                .transport
                .read_line_timeout(self.config.idle_timeout)
                .await
            {
                Ok(line) => line,
                Err(ServiceError::TimedOut) => {
                    debug!("No input within idle timeout, sending notice");
                    counter!("lineecho.sessions.idle_timeouts").increment(1);
                    if let Err(e) = self
                        .transport
                        .write_line(self.config.idle_notice.as_str())
                        .await
                    {
                        debug!(error = %e, "Failed to send idle notice");
                    }
                    return CloseReason::IdleTimeout;
                }
                Err(ServiceError::Closed) => return CloseReason::PeerClosed,
                Err(e) => return CloseReason::Fault(e.to_string()),
            };

            trace!(line = %line, "Echoing line");
            if let Err(e) = self.transport.write_line(line).await {
                return CloseReason::Fault(e.to_string());
            }
            self.lines_echoed += 1;
            counter!("lineecho.lines.echoed").increment(1);
        }
    }

    async fn close(&mut self) {
        self.set_state(SessionState::Closed);
        if let Err(e) = self.transport.shutdown().await {
            debug!(error = %e, "Error shutting down connection");
        }
    }
}

impl<S> std::fmt::Debug for IdleEchoSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdleEchoSession")
            .field("id", &self.id)
            .field(
                "state",
                &SessionState::from_u8(self.state.load(Ordering::Acquire)),
            )
            .field("lines_echoed", &self.lines_echoed)
            .field("transport", &self.transport)
            .finish()
    }
}
