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

//! Non-blocking HTTP/1.1 reactor.
//!
//! This crate provides the plumbing a request handling policy is plugged into:
//! a single-threaded [`mio`] poll loop that accepts connections, parses
//! requests with [`httparse`], hands each one to a [`Handler`][] and writes
//! the response back, streaming file bodies in chunks on writable events.
//! The loop can be stopped gracefully from any thread via a [`Stopper`][].
//!
//! [`Handler`]: crate::handler::Handler
//! [`Stopper`]: crate::server::Stopper

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]

pub mod handler;
pub mod http;
pub mod server;
