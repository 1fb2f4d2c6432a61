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

//! Event-driven static file server.
//!
//! This crate answers HTTP requests from a document root. Request paths are
//! decoded, checked for traversal and canonicalized by the [resolver][], and
//! the result is served by the [responder][] as a file, its precompressed
//! gzip sibling, a directory's index file, or a generated directory listing.
//! The [`Dispatcher`] plugs this policy into the non-blocking reactor of
//! [`hearth_serve`], and the [`ShutdownController`] stops the reactor
//! gracefully on `SIGINT`.
//!
//! [resolver]: crate::resolve
//! [responder]: crate::responder

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod dispatch;
mod error;
pub mod listing;
pub mod mime;
pub mod resolve;
pub mod responder;
pub mod shutdown;

pub use config::ServerConfig;
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use shutdown::ShutdownController;
