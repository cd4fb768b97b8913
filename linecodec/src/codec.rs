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

use crate::{CodecError, CodecResult, Line, Terminator};
use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

/// Default buffer capacity for a single line, terminator included.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// Smallest usable capacity: one content byte plus room for the terminator.
const MIN_MAX_LINE_LENGTH: usize = 2;

/// A codec splitting a byte stream into [`Line`]s and joining lines back into bytes.
///
/// `max_length` is the capacity of one line buffer including room for the terminator, so
/// a decoded line holds at most `max_length - 1` bytes. When no terminator shows up within
/// that many bytes the decoder yields exactly `max_length - 1` bytes and leaves the rest
/// buffered; the rest becomes the start of the next line.
///
/// A complete line loses its terminator and nothing else. Under [`Terminator::Lf`] one
/// carriage return in front of the line feed is also dropped, so a peer sending `\r\n`
/// can talk to an LF codec; for the same reason the LF encoder refuses text ending in
/// `\r`, which could not be read back intact. Truncated segments are returned untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCodec {
    max_length: usize,
    terminator: Terminator,
}

impl LineCodec {
    /// Creates a new `LineCodec`.
    ///
    /// A `max_length` below 2 leaves no room for content and is raised to 2.
    ///
    /// # Example
    /// ```
    /// use lineecho_linecodec::{LineCodec, Terminator};
    ///
    /// let codec = LineCodec::new(80, Terminator::Lf);
    /// assert_eq!(codec.capacity(), 79);
    /// ```
    pub fn new(max_length: usize, terminator: Terminator) -> Self {
        Self {
            max_length: max_length.max(MIN_MAX_LINE_LENGTH),
            terminator,
        }
    }

    /// Buffer capacity of one line, terminator included.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Maximum number of bytes a decoded line can hold.
    pub fn capacity(&self) -> usize {
        self.max_length - 1
    }

    /// The terminator policy for both directions.
    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    fn encode_bytes(&self, text: &[u8], dst: &mut BytesMut) -> CodecResult<()> {
        let terminator = self.terminator.as_bytes();
        if find(text, terminator).is_some() {
            return Err(CodecError::EmbeddedTerminator(self.terminator));
        }
        if self.terminator == Terminator::Lf && text.last() == Some(&b'\r') {
            return Err(CodecError::TrailingCarriageReturn);
        }
        dst.reserve(text.len() + terminator.len());
        dst.put_slice(text);
        dst.put_slice(terminator);
        Ok(())
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        LineCodec::new(DEFAULT_MAX_LINE_LENGTH, Terminator::default())
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

impl Decoder for LineCodec {
    type Item = Line;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let limit = self.capacity();
        let terminator = self.terminator.as_bytes();

        // Only a terminator starting at or before `limit` can end this line.
        let window = src.len().min(limit + terminator.len());
        if let Some(position) = find(&src[..window], terminator) {
            let mut line = src.split_to(position + terminator.len());
            let content = self.terminator.strip(&line).len();
            line.truncate(content);
            return Ok(Some(Line::from(line)));
        }

        let overflow = src.len() >= limit + terminator.len()
            || (src.len() > limit && !terminator.starts_with(&src[limit..]));
        if overflow {
            trace!(
                capacity = limit,
                buffered = src.len(),
                "Line exceeds capacity, splitting"
            );
            return Ok(Some(Line::from(src.split_to(limit))));
        }

        Ok(None)
    }
}

impl Encoder<Line> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: Line, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_bytes(item.as_bytes(), dst)
    }
}

impl Encoder<&Line> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &Line, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_bytes(item.as_bytes(), dst)
    }
}

impl Encoder<&str> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_bytes(item.as_bytes(), dst)
    }
}

impl Encoder<&[u8]> for LineCodec {
    type Error = CodecError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.encode_bytes(item, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    // ============================================================================
    // Helper Functions
    // ============================================================================

    fn collect_all(codec: &mut LineCodec, src: &mut BytesMut) -> Vec<Line> {
        let mut out = Vec::new();
        while let Some(line) = codec.decode(src).expect("decode should not error") {
            out.push(line);
        }
        out
    }

    fn buffer(bytes: &[u8]) -> BytesMut {
        BytesMut::from(bytes)
    }

    // ============================================================================
    // Decoding Tests - Complete Lines
    // ============================================================================

    #[test]
    fn decode_lf_line() {
        let mut codec = LineCodec::default();
        let mut src = buffer(b"hello\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("hello")));
        assert!(src.is_empty());
    }

    #[test]
    fn decode_lf_policy_accepts_crlf_peer() {
        let mut codec = LineCodec::new(64, Terminator::Lf);
        let mut src = buffer(b"hello\r\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("hello")));
        assert!(src.is_empty());
    }

    #[test]
    fn decode_crlf_line() {
        let mut codec = LineCodec::new(64, Terminator::CrLf);
        let mut src = buffer(b"hello\r\nworld\r\n");
        let lines = collect_all(&mut codec, &mut src);
        assert_eq!(lines, vec![Line::from("hello"), Line::from("world")]);
    }

    #[test]
    fn decode_lf_keeps_carriage_returns_before_the_crlf() {
        let mut codec = LineCodec::new(64, Terminator::Lf);
        let mut src = buffer(b"abc\r\r\n\rdef\n");
        let lines = collect_all(&mut codec, &mut src);
        assert_eq!(lines, vec![Line::from("abc\r"), Line::from("\rdef")]);
    }

    #[test]
    fn decode_crlf_strips_only_the_terminator() {
        let mut codec = LineCodec::new(64, Terminator::CrLf);
        let mut src = buffer(b"abc\r\r\nabc\n\r\n");
        let lines = collect_all(&mut codec, &mut src);
        assert_eq!(lines, vec![Line::from("abc\r"), Line::from("abc\n")]);
    }

    #[test]
    fn decode_crlf_ignores_bare_lf() {
        let mut codec = LineCodec::new(64, Terminator::CrLf);
        let mut src = buffer(b"hello\n");
        assert_eq!(codec.decode(&mut src).unwrap(), None);
        assert_eq!(&src[..], b"hello\n");

        src.extend_from_slice(b"there\r\n");
        assert_eq!(
            codec.decode(&mut src).unwrap(),
            Some(Line::from("hello\nthere"))
        );
    }

    #[test]
    fn decode_empty_line() {
        let mut codec = LineCodec::default();
        let mut src = buffer(b"\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::default()));
    }

    #[test]
    fn decode_multiple_lines_in_one_buffer() {
        let mut codec = LineCodec::default();
        let mut src = buffer(b"one\ntwo\nthree\npartial");
        let lines = collect_all(&mut codec, &mut src);
        assert_eq!(
            lines,
            vec![Line::from("one"), Line::from("two"), Line::from("three")]
        );
        assert_eq!(&src[..], b"partial");
    }

    #[test]
    fn decode_partial_line_needs_more_data() {
        let mut codec = LineCodec::default();
        let mut src = buffer(b"hel");
        assert_eq!(codec.decode(&mut src).unwrap(), None);

        src.extend_from_slice(b"lo\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("hello")));
    }

    // ============================================================================
    // Decoding Tests - Capacity Boundary
    // ============================================================================

    #[test]
    fn decode_line_filling_capacity_exactly() {
        let mut codec = LineCodec::new(6, Terminator::Lf);
        let mut src = buffer(b"abcde\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("abcde")));
        assert!(src.is_empty());
    }

    #[test]
    fn decode_truncates_long_line_and_keeps_remainder() {
        let mut codec = LineCodec::new(6, Terminator::Lf);
        let mut src = buffer(b"abcdefgh\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("abcde")));
        assert_eq!(&src[..], b"fgh\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("fgh")));
    }

    #[test]
    fn decode_waits_at_capacity_until_next_byte_arrives() {
        let mut codec = LineCodec::new(6, Terminator::Lf);
        let mut src = buffer(b"abcde");
        assert_eq!(codec.decode(&mut src).unwrap(), None);

        src.extend_from_slice(b"f");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("abcde")));
        assert_eq!(&src[..], b"f");
    }

    #[test]
    fn decode_crlf_split_across_capacity() {
        let mut codec = LineCodec::new(6, Terminator::CrLf);
        let mut src = buffer(b"abcde\r");
        assert_eq!(codec.decode(&mut src).unwrap(), None);

        src.extend_from_slice(b"\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("abcde")));
        assert!(src.is_empty());
    }

    #[test]
    fn decode_crlf_truncates_when_carriage_return_is_not_a_terminator() {
        let mut codec = LineCodec::new(6, Terminator::CrLf);
        let mut src = buffer(b"abcde\rX");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("abcde")));
        assert_eq!(&src[..], b"\rX");
    }

    #[test]
    fn decode_truncated_segment_is_not_stripped() {
        let mut codec = LineCodec::new(4, Terminator::CrLf);
        let mut src = buffer(b"ab\r\rcd");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("ab\r")));
    }

    #[test]
    #[traced_test]
    fn decode_truncation_is_traced() {
        let mut codec = LineCodec::new(4, Terminator::Lf);
        let mut src = buffer(b"abcdef\n");
        assert_eq!(codec.decode(&mut src).unwrap(), Some(Line::from("abc")));
        assert!(logs_contain("Line exceeds capacity"));
    }

    #[test]
    fn minimum_capacity_is_enforced() {
        let codec = LineCodec::new(0, Terminator::Lf);
        assert_eq!(codec.max_length(), 2);
        assert_eq!(codec.capacity(), 1);
    }

    // ============================================================================
    // Encoding Tests
    // ============================================================================

    #[test]
    fn encode_appends_terminator() {
        let mut codec = LineCodec::new(64, Terminator::Lf);
        let mut dst = BytesMut::new();
        codec.encode("hello", &mut dst).unwrap();
        assert_eq!(&dst[..], b"hello\n");

        let mut codec = LineCodec::new(64, Terminator::CrLf);
        let mut dst = BytesMut::new();
        codec.encode(Line::from("hello"), &mut dst).unwrap();
        assert_eq!(&dst[..], b"hello\r\n");
    }

    #[test]
    fn encode_empty_line() {
        let mut codec = LineCodec::default();
        let mut dst = BytesMut::new();
        codec.encode("", &mut dst).unwrap();
        assert_eq!(&dst[..], b"\n");
    }

    #[test]
    fn encode_rejects_embedded_terminator() {
        let mut codec = LineCodec::new(64, Terminator::CrLf);
        let mut dst = BytesMut::new();
        let result = codec.encode("one\r\ntwo", &mut dst);
        assert!(matches!(
            result,
            Err(CodecError::EmbeddedTerminator(Terminator::CrLf))
        ));
        assert!(dst.is_empty());

        // A bare LF is ordinary text under the CRLF policy.
        codec.encode("one\ntwo", &mut dst).unwrap();
        assert_eq!(&dst[..], b"one\ntwo\r\n");
    }

    #[test]
    fn encode_lf_rejects_trailing_carriage_return() {
        let mut codec = LineCodec::new(64, Terminator::Lf);
        let mut dst = BytesMut::new();
        let result = codec.encode("abc\r", &mut dst);
        assert!(matches!(result, Err(CodecError::TrailingCarriageReturn)));
        assert!(dst.is_empty());

        // Interior carriage returns are carried as is.
        codec.encode("a\rbc", &mut dst).unwrap();
        assert_eq!(&dst[..], b"a\rbc\n");
    }

    #[test]
    fn encode_then_decode_keeps_trailing_line_ending_bytes() {
        let mut codec = LineCodec::new(64, Terminator::CrLf);
        let mut dst = BytesMut::new();
        codec.encode("abc\r", &mut dst).unwrap();
        codec.encode("abc\n", &mut dst).unwrap();
        let lines = collect_all(&mut codec, &mut dst);
        assert_eq!(lines, vec![Line::from("abc\r"), Line::from("abc\n")]);
    }

    #[test]
    fn encode_then_decode() {
        let mut codec = LineCodec::new(64, Terminator::CrLf);
        let mut dst = BytesMut::new();
        codec.encode("first", &mut dst).unwrap();
        codec.encode(&Line::from("second"), &mut dst).unwrap();
        let lines = collect_all(&mut codec, &mut dst);
        assert_eq!(lines, vec![Line::from("first"), Line::from("second")]);
    }
}
