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

//! HTTP response.

use std::fmt;

use super::Headers;
use super::component::{Header, Status};

mod body;
mod convert;
mod ext;

pub use body::Body;
pub use ext::ResponseExt;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP response.
///
/// While all members of this struct are public, there are also some dedicated
/// methods with identical names, providing a builder-like interface. Before
/// creating a response using this struct directly, consider using the
/// [`ResponseExt`] trait, which provides several convenient constructors.
///
/// # Examples
///
/// ```
/// use hearth_serve::http::{Header, Response, Status};
///
/// // Create response
/// let res = Response::new()
///     .status(Status::Ok)
///     .header(Header::ContentType, "text/plain")
///     .header(Header::ContentLength, 5)
///     .body("hello");
/// ```
#[derive(Debug)]
pub struct Response {
    /// Response status.
    pub status: Status,
    /// Response headers.
    pub headers: Headers<'static>,
    /// Response body.
    pub body: Body,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Response {
    /// Creates a response.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the status line and headers, including the empty line that
    /// separates them from the body.
    ///
    /// # Examples
    ///
    /// ```
    /// use hearth_serve::http::{Header, Response, Status};
    ///
    /// // Create response
    /// let res = Response::new()
    ///     .status(Status::NotFound)
    ///     .header(Header::ContentLength, 0);
    ///
    /// // Serialize status line and headers
    /// let head = res.head();
    /// assert!(head.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
    /// assert!(head.ends_with(b"Content-Length: 0\r\n\r\n"));
    /// ```
    #[must_use]
    pub fn head(&self) -> Vec<u8> {
        // We estimate 64 bytes per header, which might be more than necessary,
        // but avoids reallocations in the common case
        let capacity = 48 + self.headers.len() * 64;

        // Create pre-sized buffer and append prefix and status
        let mut buffer = Vec::with_capacity(capacity);
        buffer.extend_from_slice(b"HTTP/1.1 ");
        buffer.extend_from_slice(self.status.to_string().as_bytes());
        buffer.extend_from_slice(b"\r\n");

        // Append all headers and the empty line to buffer
        for (header, value) in &self.headers {
            buffer.extend_from_slice(header.name().as_bytes());
            buffer.extend_from_slice(b": ");
            buffer.extend_from_slice(value.as_bytes());
            buffer.extend_from_slice(b"\r\n");
        }
        buffer.extend_from_slice(b"\r\n");
        buffer
    }

    /// Splits the response into its serialized head and its body.
    ///
    /// In-memory bodies are appended to the head, so they are written in one
    /// go, while file bodies are returned as they are to be streamed.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Body) {
        let mut head = self.head();
        match self.body {
            Body::Bytes(bytes) => {
                head.extend_from_slice(&bytes);
                (head, Body::default())
            }
            body => (head, body),
        }
    }
}

impl Response {
    /// Sets the status of the response.
    #[inline]
    #[must_use]
    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Adds a header to the response.
    #[allow(clippy::needless_pass_by_value)]
    #[inline]
    #[must_use]
    pub fn header<V>(mut self, header: Header, value: V) -> Self
    where
        V: ToString,
    {
        self.headers.insert(header, value.to_string());
        self
    }

    /// Sets the body of the response.
    ///
    /// __Warning__: the [`Header::ContentLength`] header is not set by this
    /// method, since it belongs to the low-level [`Response`] interface. For
    /// HEAD requests, the header must describe the body that would have been
    /// sent, which only the handler knows.
    #[inline]
    #[must_use]
    pub fn body<B>(mut self, body: B) -> Self
    where
        B: Into<Body>,
    {
        self.body = body.into();
        self
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Response {
    /// Creates a default response.
    #[inline]
    fn default() -> Self {
        Self {
            status: Status::Ok,
            headers: Headers::default(),
            body: Body::default(),
        }
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Response {
    /// Formats the response for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HTTP/1.1 {}\r\n", self.status)?;
        write!(f, "{}\r\n", self.headers)?;
        write!(f, "[Body: {} bytes]\r\n", self.body.len())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_into_parts_inlines_bytes() {
        let res = Response::new()
            .header(Header::ContentLength, 5)
            .body("hello");
        let (head, body) = res.into_parts();
        assert_eq!(head, b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello");
        assert!(body.is_empty());
    }

    #[test]
    fn test_into_parts_keeps_file() {
        let mut file = tempfile::tempfile().expect("tempfile");
        file.write_all(b"streamed").expect("write");
        let res = Response::new().body(Body::file(file, 8));
        let (head, body) = res.into_parts();
        assert_eq!(head, b"HTTP/1.1 200 OK\r\n\r\n");
        assert_eq!(body.len(), 8);
    }
}
