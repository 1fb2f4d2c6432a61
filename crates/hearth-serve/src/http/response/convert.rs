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

//! HTTP response conversions.

use std::error::Error;

use crate::http::Status;

use super::Response;
use super::ext::ResponseExt;

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl From<Status> for Response {
    /// Creates a response from a status code, see [`Response::from_status`].
    #[inline]
    fn from(status: Status) -> Self {
        Response::from_status(status)
    }
}

impl<E> From<Result<Response, E>> for Response
where
    E: Error,
{
    /// Creates a response from a result.
    ///
    /// Handlers may return results, in which case errors become responses
    /// with status "500 Internal Server Error". The body is left empty, as
    /// errors might carry details that must not be sent to clients.
    ///
    /// # Examples
    ///
    /// ```
    /// use hearth_serve::http::{Response, Status};
    /// use std::io;
    ///
    /// // Create response from failed result
    /// let res = Response::from(Err(io::Error::other("disk on fire")));
    /// assert_eq!(res.status, Status::InternalServerError);
    /// assert!(res.body.is_empty());
    /// ```
    fn from(result: Result<Response, E>) -> Self {
        result.unwrap_or_else(|_| Response::empty(Status::InternalServerError))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct Failure;

    impl fmt::Display for Failure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("failure")
        }
    }

    impl Error for Failure {}

    #[test]
    fn test_from_result() {
        let res = Response::from(Ok::<_, Failure>(Response::from_text("ok")));
        assert_eq!(res.status, Status::Ok);
        let res = Response::from(Err::<Response, _>(Failure));
        assert_eq!(res.status, Status::InternalServerError);
    }

    #[test]
    fn test_from_status() {
        let res = Response::from(Status::NotFound);
        assert_eq!(res.status, Status::NotFound);
        assert_eq!(res.body.into_bytes().expect("in memory"), b"Not Found");
    }
}
