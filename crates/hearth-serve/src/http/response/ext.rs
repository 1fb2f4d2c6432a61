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

//! HTTP response extensions.

use crate::http::{Header, Status};

use super::Response;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Extension trait for the `Response` type providing additional functionality.
pub trait ResponseExt: Sized {
    /// Creates a response from plain text.
    fn from_text<S>(content: S) -> Response
    where
        S: Into<String>,
    {
        Response::new() // fmt
            .status(Status::Ok)
            .text(content)
    }

    /// Creates a response from a status code.
    ///
    /// This is a convenience method to create a response with a status code
    /// and a text body, particularly useful for error handling.
    ///
    /// # Examples
    ///
    /// ```
    /// use hearth_serve::http::response::ResponseExt;
    /// use hearth_serve::http::{Header, Response, Status};
    ///
    /// // Create response from status
    /// let res = Response::from_status(Status::NotFound);
    /// assert_eq!(res.headers.get(Header::ContentLength), Some("9"));
    /// ```
    #[must_use]
    fn from_status(status: Status) -> Response {
        Response::new() // fmt
            .status(status)
            .text(status.name())
    }

    /// Creates a response with the given status code and no body.
    ///
    /// The `Content-Length` is set to zero, so the connection can be reused.
    #[must_use]
    fn empty(status: Status) -> Response {
        Response::new()
            .status(status)
            .header(Header::ContentLength, 0)
    }

    /// Sets the given text as the body of the response.
    fn text<S>(self, content: S) -> Response
    where
        S: Into<String>;

    /// Sets the given HTML as the body of the response.
    fn html<S>(self, content: S) -> Response
    where
        S: Into<String>;
}

// ----------------------------------------------------------------------------
// Blanket implementations
// ----------------------------------------------------------------------------

impl ResponseExt for Response {
    /// Sets the given text as the body of the response.
    fn text<S>(self, content: S) -> Response
    where
        S: Into<String>,
    {
        let content = content.into();
        self.header(Header::ContentType, "text/plain; charset=utf-8")
            .header(Header::ContentLength, content.len())
            .body(content)
    }

    /// Sets the given HTML as the body of the response.
    fn html<S>(self, content: S) -> Response
    where
        S: Into<String>,
    {
        let content = content.into();
        self.header(Header::ContentType, "text/html; charset=utf-8")
            .header(Header::ContentLength, content.len())
            .body(content)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
