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

//! HTTP request.

use std::borrow::Cow;
use std::fmt;
use std::str::{self, FromStr};

use super::Headers;
use super::component::{Header, Method, Status};

mod error;
mod uri;

pub use error::{Error, Result};
pub use uri::Uri;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Maximum size of a request, including headers and body.
const MAX_REQUEST_SIZE: usize = 8 * 1024 * 1024;

/// Maximum length of the request target.
const MAX_URI_LENGTH: usize = 2 * 1024;

/// Maximum length of a single header value.
const MAX_HEADER_LENGTH: usize = 4 * 1024;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP request.
///
/// The regular way to create a [`Request`] is to use [`Request::from_bytes`],
/// which parses a given slice of bytes. The returned [`Request`] is bound to
/// the lifetime of the byte slice, avoiding allocations where possible.
///
/// # Examples
///
/// ```
/// use hearth_serve::http::{Method, Request};
///
/// // Create request
/// let req = Request::new()
///     .method(Method::Head)
///     .uri("/index.html");
/// ```
#[derive(Clone, Debug)]
pub struct Request<'a> {
    /// Request method.
    pub method: Method,
    /// Request URI.
    pub uri: Uri<'a>,
    /// Request headers.
    pub headers: Headers<'a>,
    /// Request body.
    pub body: Cow<'a, [u8]>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Request<'a> {
    /// Creates a request.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a request from the given bytes.
    ///
    /// HTTP requests are parsed using the [`httparse`] crate. Besides parsing,
    /// this method enforces size limits on the request, the request target and
    /// header values, and requires the request target to be in origin-form,
    /// i.e., to start with a `/`. The path is not decoded or otherwise judged
    /// here, which is left to the handler.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Incomplete`], if the given buffer contained
    /// insufficient data to provide a meaningful answer, [`Error::Parser`], if
    /// the buffer contained invalid data, [`Error::Component`], when the
    /// parsed request contains an unknown [`Method`], and [`Error::Validation`]
    /// if one of the limits is exceeded.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use hearth_serve::http::{Method, Request};
    ///
    /// // Create request from bytes
    /// let req = Request::from_bytes(b"GET /a.txt HTTP/1.1\r\n\r\n")?;
    /// assert_eq!(req.method, Method::Get);
    /// assert_eq!(req.uri.path, "/a.txt");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() > MAX_REQUEST_SIZE {
            return Err(Error::Validation(Status::PayloadTooLarge));
        }

        // Initialize buffer for headers and request parser
        let mut headers = [httparse::EMPTY_HEADER; 64];
        let mut req = httparse::Request::new(&mut headers);
        let n = match req.parse(bytes)? {
            httparse::Status::Partial => return Err(Error::Incomplete),
            httparse::Status::Complete(n) => n,
        };

        // A complete parse guarantees that method and path are present, but
        // we don't want to panic in the event loop if that ever changes
        let (Some(method), Some(path)) = (req.method, req.path) else {
            return Err(Error::Validation(Status::BadRequest));
        };
        let method = Method::from_str(method)?;
        if path.len() > MAX_URI_LENGTH {
            return Err(Error::Validation(Status::UriTooLong));
        }

        // Ensure that the request URI path starts with a slash, as we do not
        // support proxy requests or asterisk-form targets
        let uri = Uri::from(path);
        if !uri.path.starts_with('/') {
            return Err(Error::Validation(Status::BadRequest));
        }

        // Unpack request headers, skipping unknown ones, but failing on values
        // exceeding the limit, as there's no sane reason for them to be large
        let mut map = Headers::new();
        for header in req.headers.iter() {
            if header.value.len() > MAX_HEADER_LENGTH {
                let status = Status::RequestHeaderFieldsTooLarge;
                return Err(Error::Validation(status));
            }
            let Ok(name) = Header::from_str(header.name) else {
                continue;
            };
            if let Ok(value) = str::from_utf8(header.value) {
                map.insert(name, value);
            }
        }

        // Return request, with the remaining bytes as the body
        Ok(Request {
            method,
            uri,
            headers: map,
            body: Cow::Borrowed(&bytes[n..]),
        })
    }
}

impl<'a> Request<'a> {
    /// Sets the method of the request.
    #[inline]
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the URI of the request.
    #[inline]
    #[must_use]
    pub fn uri<U>(mut self, uri: U) -> Self
    where
        U: Into<Uri<'a>>,
    {
        self.uri = uri.into();
        self
    }

    /// Adds a header to the request.
    ///
    /// # Examples
    ///
    /// ```
    /// use hearth_serve::http::{Header, Request};
    ///
    /// // Create request and add header
    /// let req = Request::new()
    ///     .header(Header::Connection, "close");
    /// ```
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
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for Request<'_> {
    /// Creates a default request, i.e., `GET /`.
    #[inline]
    fn default() -> Self {
        Self {
            method: Method::Get,
            uri: Uri::default(),
            headers: Headers::default(),
            body: Cow::Borrowed(&[]),
        }
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Request<'_> {
    /// Formats the request for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} HTTP/1.1\r\n", self.method, self.uri)?;
        write!(f, "{}\r\n", self.headers)?;
        write!(f, "[Body: {} bytes]\r\n", self.body.len())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let bytes = b"HEAD /docs/?x=1 HTTP/1.1\r\nHost: localhost\r\n\
            X-Unknown: yes\r\nConnection: close\r\n\r\n";
        let req = Request::from_bytes(bytes).expect("parses");
        assert_eq!(req.method, Method::Head);
        assert_eq!(req.uri.path, "/docs/");
        assert_eq!(req.uri.query.as_deref(), Some("x=1"));
        assert_eq!(req.headers.get(Header::Host), Some("localhost"));
        assert_eq!(req.headers.len(), 2);
        assert!(req.headers.wants_close());
    }

    #[test]
    fn test_from_bytes_keeps_traversal_for_handler() {
        let req = Request::from_bytes(b"GET /../etc/passwd HTTP/1.1\r\n\r\n")
            .expect("parses");
        assert_eq!(req.uri.path, "/../etc/passwd");
    }

    #[test]
    fn test_from_bytes_incomplete() {
        let res = Request::from_bytes(b"GET /a.txt HTTP/1.1\r\nHost: x");
        assert!(matches!(res, Err(Error::Incomplete)));
    }

    #[test]
    fn test_from_bytes_unknown_method() {
        let res = Request::from_bytes(b"BREW /pot HTTP/1.1\r\n\r\n");
        assert!(matches!(res, Err(Error::Component(_))));
    }

    #[test]
    fn test_from_bytes_lowercase_method() {
        let res = Request::from_bytes(b"get /a.txt HTTP/1.1\r\n\r\n");
        assert!(matches!(res, Err(Error::Component(_))));
    }

    #[test]
    fn test_from_bytes_absolute_form() {
        let res =
            Request::from_bytes(b"GET http://example.com/ HTTP/1.1\r\n\r\n");
        assert!(matches!(res, Err(Error::Validation(Status::BadRequest))));
    }

    #[test]
    fn test_from_bytes_uri_too_long() {
        let path = "/a".repeat(MAX_URI_LENGTH);
        let bytes = format!("GET {path} HTTP/1.1\r\n\r\n");
        let res = Request::from_bytes(bytes.as_bytes());
        assert!(matches!(res, Err(Error::Validation(Status::UriTooLong))));
    }

    #[test]
    fn test_from_bytes_header_too_large() {
        let value = "x".repeat(MAX_HEADER_LENGTH + 1);
        let bytes = format!("GET / HTTP/1.1\r\nReferer: {value}\r\n\r\n");
        let res = Request::from_bytes(bytes.as_bytes());
        assert!(matches!(
            res,
            Err(Error::Validation(Status::RequestHeaderFieldsTooLarge))
        ));
    }
}
