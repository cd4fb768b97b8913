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

//! # Lineecho Line Codec
//!
//! Framing for line oriented text protocols over a byte stream. A line is a run of bytes
//! ended by a [`Terminator`]; the codec strips the terminator on decode and appends it on
//! encode. Both directions use the same terminator policy.
//!
//! ## Core Components
//!
//! ### [`LineCodec`]
//!
//! Implements [`Decoder`] and [`Encoder`] from `tokio_util::codec`. It is configured with
//! a maximum line length (the buffer capacity, including room for the terminator) and a
//! terminator policy. Lines longer than the capacity are split at `max_length - 1` bytes;
//! the remaining bytes stay buffered and are decoded as the next line.
//!
//! ### [`Line`]
//!
//! A cheaply clonable, terminator free line of bytes.
//!
//! ## Usage Example
//!
//! ```rust
//! use bytes::BytesMut;
//! use lineecho_linecodec::{Line, LineCodec, Terminator};
//! use tokio_util::codec::{Decoder, Encoder};
//!
//! let mut codec = LineCodec::new(1024, Terminator::CrLf);
//! let mut buffer = BytesMut::new();
//! codec.encode("hello", &mut buffer).unwrap();
//! assert_eq!(&buffer[..], b"hello\r\n");
//!
//! let line = codec.decode(&mut buffer).unwrap();
//! assert_eq!(line, Some(Line::from("hello")));
//! ```
//!
//! [`Decoder`]: tokio_util::codec::Decoder
//! [`Encoder`]: tokio_util::codec::Encoder

mod codec;
mod line;
mod result;
mod terminator;

pub use codec::{DEFAULT_MAX_LINE_LENGTH, LineCodec};
pub use line::Line;
pub use result::{CodecError, CodecResult};
pub use terminator::Terminator;
