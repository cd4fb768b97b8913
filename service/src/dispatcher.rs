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

//! Connection dispatcher
//!
//! The dispatcher owns the listening socket and starts one detached
//! [`IdleEchoSession`] task per accepted connection. It never waits for sessions and
//! places no cap on how many run at once.

use crate::{
    ActiveSessionCounter, IdleEchoSession, Result, ServerConfig, ServiceError, SessionConfig,
    SessionId,
};
use std::future::Future;
use std::io::{self, ErrorKind};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{error, info, instrument, warn};

/// Create a listening socket on `address` with the given backlog
///
/// Failures at any step are reported as [`ServiceError::Bind`] and are not retried.
pub fn create_listener(address: SocketAddr, backlog: u32) -> Result<TcpListener> {
    let bind_error = |source: io::Error| ServiceError::Bind { address, source };

    let socket = if address.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(bind_error)?;
    socket.set_reuseaddr(true).map_err(bind_error)?;
    socket.bind(address).map_err(bind_error)?;
    socket.listen(backlog).map_err(bind_error)
}

/// Accept failures that concern one pending connection rather than the listener.
///
/// These are logged and the accept loop keeps going; anything else stops the dispatcher.
fn is_transient_accept_error(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::ConnectionAborted
            | ErrorKind::ConnectionReset
            | ErrorKind::Interrupted
            | ErrorKind::WouldBlock
    )
}

/// Accept loop turning a listening socket into independent echo sessions
///
/// # Example
///
/// ```no_run
/// use lineecho_service::{ConnectionDispatcher, ServerConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let dispatcher = ConnectionDispatcher::bind(ServerConfig::for_port(7000)).await?;
///     dispatcher.serve_until(async {
///         let _ = tokio::signal::ctrl_c().await;
///     }).await?;
///     Ok(())
/// }
/// ```
pub struct ConnectionDispatcher {
    /// Server configuration
    config: ServerConfig,
    /// Listening socket
    listener: TcpListener,
    /// Actual bind address
    local_addr: SocketAddr,
    /// Live session count shared with every session
    counter: Arc<ActiveSessionCounter>,
    /// Last session ID handed out
    last_session_id: u64,
    /// Dispatcher start time
    started_at: Instant,
}

impl ConnectionDispatcher {
    /// Validate `config`, then bind and listen on its address
    pub async fn bind(config: ServerConfig) -> Result<Self> {
        config.validate().map_err(ServiceError::InvalidConfig)?;

        let listener = create_listener(config.bind_address, config.backlog)?;
        let local_addr = listener.local_addr()?;

        info!(
            backlog = config.backlog,
            idle_timeout = ?config.idle_timeout,
            terminator = %config.terminator,
            "Dispatcher listening on {}",
            local_addr
        );

        Ok(Self {
            config,
            listener,
            local_addr,
            counter: Arc::new(ActiveSessionCounter::new()),
            last_session_id: 0,
            started_at: Instant::now(),
        })
    }

    /// Use `counter` instead of the dispatcher's own live session counter
    pub fn with_counter(mut self, counter: Arc<ActiveSessionCounter>) -> Self {
        self.counter = counter;
        self
    }

    /// Get the dispatcher's bind address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get the live session counter
    pub fn counter(&self) -> Arc<ActiveSessionCounter> {
        self.counter.clone()
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Accept connections until a fatal accept error
    ///
    /// Never returns `Ok`.
    pub async fn serve(self) -> Result<()> {
        self.serve_until(std::future::pending()).await
    }

    /// Accept connections until `shutdown` resolves or a fatal accept error occurs
    ///
    /// Shutdown only stops accepting; sessions already running continue until they end
    /// on their own. The listener is closed when this returns.
    #[instrument(name = "dispatcher", skip_all, fields(local_addr = %self.local_addr))]
    pub async fn serve_until<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let session_config = self.config.session_config();
        tokio::pin!(shutdown);

        loop {
            let accepted = tokio::select! {
                result = self.listener.accept() => result,
                () = &mut shutdown => {
                    info!(
                        active = self.counter.get(),
                        sessions = self.last_session_id,
                        uptime = ?self.started_at.elapsed(),
                        "Shutdown requested, no longer accepting connections"
                    );
                    return Ok(());
                }
            };

            match accepted {
                Ok((stream, peer_addr)) => self.dispatch(stream, peer_addr, &session_config),
                Err(e) if is_transient_accept_error(&e) => {
                    warn!(error = %e, "Transient accept failure, continuing");
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection, stopping dispatcher");
                    return Err(ServiceError::Accept(e));
                }
            }
        }
    }

    fn dispatch(&mut self, stream: TcpStream, peer_addr: SocketAddr, config: &SessionConfig) {
        self.last_session_id += 1;
        let id = SessionId::new(self.last_session_id);
        info!(session_id = %id, peer = %peer_addr, "Accepted connection");

        let session = IdleEchoSession::new(id, stream, self.counter.clone(), config.clone());
        // Detached: the session owns its cleanup.
        tokio::spawn(session.run());
    }
}

impl std::fmt::Debug for ConnectionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionDispatcher")
            .field("local_addr", &self.local_addr)
            .field("active_sessions", &self.counter.get())
            .field("sessions", &self.last_session_id)
            .field("uptime", &self.started_at.elapsed())
            .finish()
    }
}
