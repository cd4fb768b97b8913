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

use std::fmt;

/// Line terminator policy shared by the decoder and the encoder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// A single line feed (`\n`).
    #[default]
    Lf,
    /// Carriage return followed by line feed (`\r\n`).
    CrLf,
}

impl Terminator {
    /// The exact byte sequence placed on the wire.
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Terminator::Lf => b"\n",
            Terminator::CrLf => b"\r\n",
        }
    }

    /// Length of the terminator in bytes.
    pub const fn size(self) -> usize {
        self.as_bytes().len()
    }

    /// Removes a trailing terminator from `line`, if there is one.
    ///
    /// Under [`Terminator::Lf`] a single carriage return directly before the line feed
    /// goes with it, so `\r\n` peers read the same text as `\n` peers. Nothing else is
    /// removed: a line without a trailing terminator comes back unchanged.
    pub fn strip(self, line: &[u8]) -> &[u8] {
        match self {
            Terminator::Lf => match line.strip_suffix(b"\n") {
                Some(rest) => rest.strip_suffix(b"\r").unwrap_or(rest),
                None => line,
            },
            Terminator::CrLf => line.strip_suffix(b"\r\n").unwrap_or(line),
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Lf => write!(f, "LF"),
            Terminator::CrLf => write!(f, "CRLF"),
        }
    }
}
