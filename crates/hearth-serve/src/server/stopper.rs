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

//! HTTP server stopper.

use mio::Waker;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP server stopper.
///
/// A stopper is a cloneable handle that asks a [`Server`][] to stop gracefully
/// from any thread. Once stopped, the server closes its listeners and idle
/// connections, finishes writing all responses in flight, and then returns
/// from [`Server::run`][]. Stopping is idempotent, so it's safe to call
/// [`Stopper::stop`] as often as needed.
///
/// [`Server`]: crate::server::Server
/// [`Server::run`]: crate::server::Server::run
#[derive(Clone, Debug)]
pub struct Stopper {
    /// Stop flag.
    flag: Arc<AtomicBool>,
    /// Waker of the server's poller.
    waker: Arc<Waker>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Stopper {
    /// Creates a stopper waking the given waker.
    pub(crate) fn new(waker: Arc<Waker>) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            waker,
        }
    }

    /// Requests the server to stop.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use hearth_serve::handler::NotFound;
    /// use hearth_serve::server::Server;
    ///
    /// // Create server and stop it before it runs
    /// let mut server = Server::new(NotFound, "127.0.0.1:0")?;
    /// server.stopper().stop();
    ///
    /// // Run server, which returns immediately
    /// server.run()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
        if let Err(err) = self.waker.wake() {
            warn!("Failed to wake server: {err}");
        }
    }

    /// Returns whether the server was requested to stop.
    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
