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

//! Line transport
//!
//! [`LineTransport`] turns a connected byte stream into a line API on top of
//! [`LineCodec`]. Reads and writes retry on [`ErrorKind::Interrupted`] and surface every
//! other failure immediately.

use crate::{Result, ServiceError};
use bytes::BytesMut;
use lineecho_linecodec::{Line, LineCodec};
use std::io::{self, ErrorKind};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, trace};

/// Byte and line counts for one transport
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransportStats {
    /// Bytes received from the stream
    pub bytes_read: u64,
    /// Bytes accepted by the stream
    pub bytes_written: u64,
    /// Lines handed to the caller
    pub lines_read: u64,
    /// Lines fully written
    pub lines_written: u64,
}

/// A line oriented wrapper around an exclusively owned byte stream
///
/// Bytes past the end of a returned line stay in an internal buffer and start the next
/// line, including the remainder of a line split at the codec's capacity.
pub struct LineTransport<S> {
    stream: S,
    codec: LineCodec,
    read_buffer: BytesMut,
    write_buffer: BytesMut,
    stats: TransportStats,
}

impl<S> LineTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap `stream`, framing lines with `codec`
    pub fn new(stream: S, codec: LineCodec) -> Self {
        Self {
            stream,
            read_buffer: BytesMut::with_capacity(codec.max_length()),
            write_buffer: BytesMut::with_capacity(codec.max_length()),
            codec,
            stats: TransportStats::default(),
        }
    }

    /// The codec framing this transport
    pub fn codec(&self) -> LineCodec {
        self.codec
    }

    /// Counters for this transport
    pub fn stats(&self) -> TransportStats {
        self.stats
    }

    /// Bytes received but not yet returned as a line
    pub fn buffered(&self) -> usize {
        self.read_buffer.len()
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Unwrap the transport, dropping any buffered input
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Read the next line, waiting as long as it takes
    ///
    /// Returns [`ServiceError::Closed`] when the stream ends before a terminator arrives,
    /// whether or not part of a line was received; the partial bytes are discarded.
    pub async fn read_line(&mut self) -> Result<Line> {
        loop {
            if let Some(line) = self.codec.decode(&mut self.read_buffer)? {
                self.stats.lines_read += 1;
                trace!(length = line.len(), "Line received");
                return Ok(line);
            }

            self.read_buffer.reserve(self.codec.max_length());
            match self.stream.read_buf(&mut self.read_buffer).await {
                Ok(0) => {
                    if !self.read_buffer.is_empty() {
                        debug!(
                            discarded = self.read_buffer.len(),
                            "Stream closed mid-line, discarding partial input"
                        );
                        self.read_buffer.clear();
                    }
                    return Err(ServiceError::Closed);
                }
                Ok(count) => self.stats.bytes_read += count as u64,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read the next line, giving up after `timeout`
    ///
    /// The bound covers the whole call, not each individual read. On expiry the result
    /// is [`ServiceError::TimedOut`] and any partial line is discarded.
    pub async fn read_line_timeout(&mut self, timeout: Duration) -> Result<Line> {
        match tokio::time::timeout(timeout, self.read_line()).await {
            Ok(result) => result,
            Err(_) => {
                if !self.read_buffer.is_empty() {
                    debug!(
                        discarded = self.read_buffer.len(),
                        "Read timed out, discarding partial input"
                    );
                    self.read_buffer.clear();
                }
                Err(ServiceError::TimedOut)
            }
        }
    }

    /// Write `line` followed by the terminator
    ///
    /// Either every byte reaches the stream and the total (terminator included) is
    /// returned, or an error is returned. A write accepting zero bytes is reported as
    /// [`ErrorKind::WriteZero`].
    pub async fn write_line(&mut self, line: impl Into<Line>) -> Result<usize> {
        let line = line.into();
        self.write_buffer.clear();
        self.codec.encode(&line, &mut self.write_buffer)?;

        let mut written = 0;
        while written < self.write_buffer.len() {
            match self.stream.write(&self.write_buffer[written..]).await {
                Ok(0) => {
                    return Err(io::Error::new(
                        ErrorKind::WriteZero,
                        "stream accepted no bytes",
                    )
                    .into());
                }
                Ok(count) => written += count,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.flush().await?;

        self.stats.bytes_written += written as u64;
        self.stats.lines_written += 1;
        trace!(length = line.len(), written, "Line sent");
        Ok(written)
    }

    async fn flush(&mut self) -> Result<()> {
        loop {
            match self.stream.flush().await {
                Ok(()) => return Ok(()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Shut down the write side of the stream
    pub async fn shutdown(&mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }
}

impl LineTransport<TcpStream> {
    /// Address of the remote peer
    pub fn peer_addr(&self) -> Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }

    /// Local address of the connection
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.stream.local_addr()?)
    }
}

impl<S> std::fmt::Debug for LineTransport<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineTransport")
            .field("codec", &self.codec)
            .field("buffered", &self.read_buffer.len())
            .field("stats", &self.stats)
            .finish()
    }
}
