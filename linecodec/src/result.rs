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

use crate::Terminator;
use thiserror::Error;

/// Result Type for Codec Operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Represents possible errors that can occur while framing lines.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An I/O error occurred while reading from or writing to the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The text handed to the encoder contains the terminator sequence, which the
    /// wire format has no way to escape.
    #[error("line contains the {0} terminator and cannot be framed")]
    EmbeddedTerminator(Terminator),

    /// Under the LF policy a trailing carriage return would be read back as part of a
    /// CRLF terminator and lost.
    #[error("line ends with a carriage return and cannot be framed with LF")]
    TrailingCarriageReturn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::EmbeddedTerminator(Terminator::CrLf);
        assert_eq!(
            err.to_string(),
            "line contains the CRLF terminator and cannot be framed"
        );

        assert_eq!(
            CodecError::TrailingCarriageReturn.to_string(),
            "line ends with a carriage return and cannot be framed with LF"
        );

        let err = CodecError::from(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert_eq!(err.to_string(), "I/O error: pipe closed");
    }
}
