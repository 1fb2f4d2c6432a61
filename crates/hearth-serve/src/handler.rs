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

//! Handler.

use super::http::response::ResponseExt;
use super::http::{Request, Response, Status};

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Handler.
///
/// A handler is the policy plugged into the [`Server`][]: the server takes
/// care of sockets and framing, and asks the handler for exactly one response
/// per parsed request. Handlers can't fail, so every error must be turned
/// into a status code before returning.
///
/// Closures taking a [`Request`] and returning anything convertible into a
/// [`Response`] are handlers, too.
///
/// [`Server`]: crate::server::Server
///
/// # Examples
///
/// ```
/// use hearth_serve::handler::Handler;
/// use hearth_serve::http::response::ResponseExt;
/// use hearth_serve::http::{Request, Response, Status};
///
/// // Create handler echoing the request path
/// let handler = |req: Request| Response::from_text(req.uri.path);
///
/// // Handle request with handler
/// let res = handler.handle(Request::new().uri("/hello"));
/// assert_eq!(res.status, Status::Ok);
/// ```
pub trait Handler {
    /// Handles the given request.
    fn handle(&self, req: Request) -> Response;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Handler answering every request with "404 Not Found".
///
/// # Examples
///
/// ```
/// use hearth_serve::handler::{Handler, NotFound};
/// use hearth_serve::http::{Request, Status};
///
/// // Handle request with handler
/// let res = NotFound.handle(Request::new());
/// assert_eq!(res.status, Status::NotFound);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct NotFound;

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Handler for NotFound {
    #[inline]
    fn handle(&self, _req: Request) -> Response {
        Response::from_status(Status::NotFound)
    }
}

// ----------------------------------------------------------------------------
// Blanket implementations
// ----------------------------------------------------------------------------

impl<F, R> Handler for F
where
    F: Fn(Request) -> R,
    R: Into<Response>,
{
    #[inline]
    fn handle(&self, req: Request) -> Response {
        self(req).into()
    }
}
