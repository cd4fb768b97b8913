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

//! Echo client implementation

use crate::{ClientConfig, ClientError, Result};
use lineecho_service::{Line, LineCodec, LineTransport};
use std::net::SocketAddr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, instrument};

/// Prompt printed before every line of input
pub const PROMPT: &str = "Enter the string to echo ('q' to quit): ";

/// Client connected to a line echo server
pub struct EchoClient {
    transport: LineTransport<TcpStream>,
    config: ClientConfig,
}

impl EchoClient {
    /// Connect to the server named in `config`
    #[instrument(skip(config), fields(address = %config.address()))]
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        config.validate().map_err(ClientError::InvalidConfig)?;

        let address = config.address();
        let stream = match timeout(config.connect_timeout, TcpStream::connect(&address)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(ClientError::Connect { address, source }),
            Err(_) => return Err(ClientError::ConnectTimeout(config.connect_timeout)),
        };
        info!("Connected");

        let codec = LineCodec::new(config.max_line_length, config.terminator);
        Ok(Self {
            transport: LineTransport::new(stream, codec),
            config,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Address of the server
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        Ok(self.transport.peer_addr()?)
    }

    /// Send one line, returning the bytes written
    pub async fn send_line(&mut self, line: impl Into<Line>) -> Result<usize> {
        Ok(self.transport.write_line(line).await?)
    }

    /// Wait for the next line from the server
    pub async fn receive_line(&mut self) -> Result<Line> {
        Ok(self.transport.read_line().await?)
    }

    /// Send `line` and wait for the server's answer
    pub async fn echo(&mut self, line: impl Into<Line>) -> Result<Line> {
        self.send_line(line).await?;
        self.receive_line().await
    }

    /// Prompt on `output` and echo lines read from `input`
    ///
    /// Stops without error at end of input or on a line consisting of `q` or `Q`.
    /// Errors on the connection or on `output` end the loop and are returned.
    pub async fn run_interactive<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(text) = lines.next_line().await? else {
                debug!("End of input");
                break;
            };
            if text == "q" || text == "Q" {
                debug!("Quit requested");
                break;
            }

            let response = self.echo(text).await?;
            output
                .write_all(format!("Echo response: {}\n", response).as_bytes())
                .await?;
        }
        Ok(())
    }

    /// Shut down the connection
    pub async fn close(mut self) -> Result<()> {
        self.transport.shutdown().await?;
        info!("Disconnected");
        Ok(())
    }
}

impl std::fmt::Debug for EchoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EchoClient")
            .field("address", &self.config.address())
            .field("transport", &self.transport)
            .finish()
    }
}
