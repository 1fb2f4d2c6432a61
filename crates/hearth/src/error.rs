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

//! Request handling error.

use hearth_serve::http::Status;
use std::path::PathBuf;
use std::{io, result};
use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Request handling error.
///
/// Every failure that can occur while answering a request is represented by
/// one of these variants, and maps to exactly one status code, so errors never
/// need to travel past the dispatcher.
#[derive(Debug, Error)]
pub enum Error {
    /// Request path could not be percent-decoded.
    #[error("malformed request path: {0}")]
    Decode(String),

    /// Request path contains `..`.
    #[error("path traversal rejected: {0}")]
    Traversal(String),

    /// Neither the path nor its gzip sibling exist.
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File exists, but could not be opened.
    #[error("failed to open {}: {err}", .path.display())]
    Open {
        /// Path of the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        err: io::Error,
    },

    /// Directory listing could not be rendered.
    #[error(transparent)]
    Template(#[from] minijinja::Error),
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Error {
    /// Returns the status code the error is answered with.
    #[must_use]
    pub fn status(&self) -> Status {
        match self {
            Error::Decode(_) => Status::BadRequest,
            Error::Traversal(_) | Error::NotFound(_) => Status::NotFound,
            Error::Open { .. } | Error::Template(_) => {
                Status::InternalServerError
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Request handling result.
pub type Result<T = ()> = result::Result<T, Error>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        let test_cases = vec![
            (Error::Decode("/%zz".into()), Status::BadRequest),
            (Error::Traversal("/..".into()), Status::NotFound),
            (Error::NotFound("/srv/x".into()), Status::NotFound),
            (
                Error::Open { path: "/srv/x".into(), err: denied },
                Status::InternalServerError,
            ),
        ];
        for (err, expected) in test_cases {
            assert_eq!(err.status(), expected, "Failed for error: {err}");
        }
    }
}
