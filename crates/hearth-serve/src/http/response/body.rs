// Copyright (c) 2025 Zensical and contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! HTTP response body.

use std::fs::File;
use std::io::{self, Read};

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// HTTP response body.
///
/// Bodies are either held in memory, or backed by an open file, which the
/// server streams to the client in chunks without loading it into memory. A
/// file body carries the number of bytes to send, which is fixed when the
/// body is created, so the `Content-Length` stays truthful even if the file
/// grows while it's being sent.
#[derive(Debug)]
pub enum Body {
    /// In-memory body.
    Bytes(Vec<u8>),
    /// File-backed body.
    File(File, u64),
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Body {
    /// Creates a file-backed body sending the first `len` bytes of the file.
    #[inline]
    #[must_use]
    pub fn file(file: File, len: u64) -> Self {
        Body::File(file, len)
    }

    /// Returns the number of bytes in the body.
    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        match self {
            Body::Bytes(bytes) => bytes.len() as u64,
            Body::File(_, len) => *len,
        }
    }

    /// Returns whether the body is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the body and reads it into memory.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use hearth_serve::http::Body;
    ///
    /// // Create body and read it
    /// let body = Body::from("hello");
    /// assert_eq!(body.into_bytes()?, b"hello");
    /// # Ok(())
    /// # }
    /// ```
    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        match self {
            Body::Bytes(bytes) => Ok(bytes),
            Body::File(file, len) => {
                let mut buffer = Vec::new();
                file.take(len).read_to_end(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Body {
    /// Creates an empty body.
    #[inline]
    fn default() -> Self {
        Body::Bytes(Vec::new())
    }
}

// ----------------------------------------------------------------------------

impl From<Vec<u8>> for Body {
    #[inline]
    fn from(value: Vec<u8>) -> Self {
        Body::Bytes(value)
    }
}

impl From<&[u8]> for Body {
    #[inline]
    fn from(value: &[u8]) -> Self {
        Body::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Body {
    #[inline]
    fn from(value: [u8; N]) -> Self {
        Body::Bytes(value.to_vec())
    }
}

impl From<String> for Body {
    #[inline]
    fn from(value: String) -> Self {
        Body::Bytes(value.into_bytes())
    }
}

impl From<&str> for Body {
    #[inline]
    fn from(value: &str) -> Self {
        Body::Bytes(value.as_bytes().to_vec())
    }
}
