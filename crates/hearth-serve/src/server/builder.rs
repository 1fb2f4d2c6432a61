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

//! HTTP server builder.

use mio::net::TcpListener;
use mio::{Interest, Token};
use slab::Slab;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use crate::handler::Handler;

use super::poller::Poller;
use super::{Error, Result, Server, Stopper};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Idle timeout, unless configured otherwise.
const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP server builder.
///
/// Collects the addresses to listen on and the connection settings, and
/// binds all listeners at once when [`Builder::listen`] is called, so a
/// server either listens on every address or fails as a whole.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use std::time::Duration;
///
/// use hearth_serve::handler::NotFound;
/// use hearth_serve::server::Builder;
///
/// // Listen on an ephemeral port with a short idle timeout
/// let server = Builder::new(NotFound)
///     .bind("127.0.0.1:0")?
///     .idle_timeout(Duration::from_secs(5))
///     .listen()?;
/// assert_eq!(server.local_addrs()?.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct Builder<H> {
    /// Request handler.
    handler: H,
    /// Addresses to listen on, without duplicates.
    addrs: Vec<SocketAddr>,
    /// Idle timeout of connections.
    idle_timeout: Duration,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<H> Builder<H>
where
    H: Handler,
{
    /// Creates a server builder for the given handler.
    ///
    /// [`Server::builder`] is the shorthand for this method.
    #[must_use]
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            addrs: Vec::new(),
            idle_timeout: IDLE_TIMEOUT,
        }
    }

    /// Adds all socket addresses the given address resolves to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the address can't be resolved.
    pub fn bind<A>(mut self, addr: A) -> Result<Self>
    where
        A: ToSocketAddrs,
    {
        // Resolvers may yield the same address more than once
        for addr in addr.to_socket_addrs()? {
            if !self.addrs.contains(&addr) {
                self.addrs.push(addr);
            }
        }
        Ok(self)
    }

    /// Sets the duration after which idle connections are closed.
    #[inline]
    #[must_use]
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Binds a listener to every address and creates the server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAddress`] if no address was added, and
    /// [`Error::Io`] if a listener can't be bound or registered.
    pub fn listen(self) -> Result<Server<H>> {
        if self.addrs.is_empty() {
            return Err(Error::NoAddress);
        }

        // Listener tokens are their indices, starting from zero
        let poller = Poller::new()?;
        let mut acceptors = Vec::with_capacity(self.addrs.len());
        for addr in self.addrs {
            let mut listener = TcpListener::bind(addr)?;
            let token = Token(acceptors.len());
            poller
                .registry()
                .register(&mut listener, token, Interest::READABLE)?;
            acceptors.push(listener);
        }

        // Connection tokens are offset by the number of listeners, which
        // doesn't change when the listeners are dropped on stop
        Ok(Server {
            handler: self.handler,
            stopper: Stopper::new(poller.waker()),
            offset: acceptors.len(),
            events: poller,
            acceptors,
            connections: Slab::new(),
            idle_timeout: self.idle_timeout,
            stopping: false,
        })
    }
}
