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

//! HTTP server.

use mio::net::TcpListener;
use mio::{Interest, Token};
use slab::Slab;
use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::handler::Handler;

mod builder;
mod connection;
mod error;
mod poller;
mod stopper;

pub use builder::Builder;
use connection::{Connection, Signal};
pub use error::{Error, Result};
use poller::{Poller, WAKER};
pub use stopper::Stopper;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Maximum time to block while waiting for events.
const POLL_TIMEOUT: Duration = Duration::from_secs(10);

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP server.
///
/// The server is a single-threaded reactor: every call to [`Server::poll`]
/// waits for readiness events, accepts new connections, reads and handles
/// complete requests, and writes responses, streaming file bodies in chunks
/// as the socket becomes writable. A slow client thus never blocks others.
///
/// Tokens map directly to indices: listeners use the first tokens, followed
/// by connections, while the poller's waker uses the last token.
pub struct Server<H>
where
    H: Handler,
{
    /// Handler for incoming requests.
    handler: H,
    /// Poller for I/O events.
    events: Poller,
    /// Acceptors for incoming connections.
    acceptors: Vec<TcpListener>,
    /// Token offset of connections.
    offset: usize,
    /// HTTP connections.
    connections: Slab<Connection>,
    /// Idle timeout of connections.
    idle_timeout: Duration,
    /// Stopper, shared with other threads.
    stopper: Stopper,
    /// Whether the server is draining connections.
    stopping: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<H> Server<H>
where
    H: Handler,
{
    /// Creates a server.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use hearth_serve::handler::NotFound;
    /// use hearth_serve::server::Server;
    ///
    /// // Create server
    /// let server = Server::new(NotFound, "127.0.0.1:0")?;
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    pub fn new<A>(handler: H, addr: A) -> Result<Self>
    where
        A: ToSocketAddrs,
    {
        Self::builder(handler).bind(addr)?.listen()
    }

    /// Creates a server builder.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use std::time::Duration;
    /// use hearth_serve::handler::NotFound;
    /// use hearth_serve::server::Server;
    ///
    /// // Create server builder
    /// let server = Server::builder(NotFound)
    ///     .bind("127.0.0.1:0")?
    ///     .idle_timeout(Duration::from_secs(5))
    ///     .listen()?;
    /// # Ok(())
    /// # }
    /// ```
    #[inline]
    #[must_use]
    pub fn builder(handler: H) -> Builder<H> {
        Builder::new(handler)
    }

    /// Returns a stopper to stop the server from another thread.
    #[inline]
    #[must_use]
    pub fn stopper(&self) -> Stopper {
        self.stopper.clone()
    }

    /// Returns the addresses the server is listening on.
    ///
    /// This is particularly useful when binding to port `0`, which lets the
    /// operating system pick a free port. Once stopped, the list is empty.
    pub fn local_addrs(&self) -> Result<Vec<SocketAddr>> {
        self.acceptors
            .iter()
            .map(|acceptor| acceptor.local_addr().map_err(Into::into))
            .collect()
    }

    /// Polls the server until it was stopped and all responses were written.
    pub fn run(&mut self) -> Result {
        while self.poll()? {}
        info!("Server stopped");
        Ok(())
    }

    /// Polls the server for incoming events.
    ///
    /// Returns `false` once the server was stopped and all connections were
    /// drained, which means there's nothing left to do.
    pub fn poll(&mut self) -> Result<bool> {
        self.events.poll(Some(POLL_TIMEOUT))?;
        if self.stopper.is_stopped() && !self.stopping {
            self.drain()?;
        }

        // Clean up timed out connections
        self.reap(Instant::now())?;

        // Collect events first, so we can mutably borrow the server while
        // handling them, which we need for accepting and closing connections
        let ready = self
            .events
            .iter()
            .map(|event| {
                let n: usize = event.token().into();
                (n, event.is_readable(), event.is_writable())
            })
            .collect::<Vec<_>>();

        // Handle events - the waker only interrupts polling, as the stop flag
        // was already checked above
        for (n, readable, writable) in ready {
            if Token(n) == WAKER {
                continue;
            }
            if n < self.offset {
                self.accept(n)?;
                continue;
            }

            // Read before writing, since reading a complete request switches
            // the connection to writing. Connections might already be gone,
            // e.g., when closed by an earlier signal.
            let key = n - self.offset;
            if readable {
                if let Some(conn) = self.connections.get_mut(key) {
                    let signal = conn.read(&self.handler);
                    self.apply(key, signal)?;
                }
            }
            if writable {
                if let Some(conn) = self.connections.get_mut(key) {
                    let signal = conn.write();
                    self.apply(key, signal)?;
                }
            }
        }

        // Keep on polling, unless we're stopping and everything's written
        Ok(!(self.stopping && self.connections.is_empty()))
    }

    /// Accepts all pending connections on the given acceptor.
    fn accept(&mut self, n: usize) -> Result {
        let Some(acceptor) = self.acceptors.get(n) else {
            return Ok(());
        };

        // Accept new connections - note that we need to run this in a loop, as
        // browsers might open several new connections at once
        loop {
            match acceptor.accept() {
                Ok((socket, addr)) => {
                    debug!("Accepted connection from {addr}");
                    let entry = self.connections.vacant_entry();
                    let token = Token(self.offset + entry.key());
                    let conn = entry.insert(Connection::new(socket));
                    self.events.registry().register(
                        conn.socket(),
                        token,
                        Interest::READABLE,
                    )?;
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => {}

                // Everything else is reported, but the listener stays alive,
                // e.g., when running out of file descriptors
                Err(err) => {
                    warn!("Accept error: {err}");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Applies the signal returned by a connection.
    fn apply(&mut self, key: usize, signal: Signal) -> Result {
        match signal {
            // Change of interest - reregister with poller
            Signal::Interest(interest) => {
                let token = Token(self.offset + key);
                if let Some(conn) = self.connections.get_mut(key) {
                    self.events
                        .registry()
                        .reregister(conn.socket(), token, interest)?;
                }
                Ok(())
            }

            // Close connection and deregister from poller
            Signal::Close => self.close(key),

            // Continue without changes
            Signal::Continue => Ok(()),
        }
    }

    /// Closes the connection with the given key.
    fn close(&mut self, key: usize) -> Result {
        if let Some(conn) = self.connections.try_remove(key) {
            let mut socket = conn.into_socket();
            self.events.registry().deregister(&mut socket)?;
        }
        Ok(())
    }

    /// Closes all connections that were idle for too long.
    fn reap(&mut self, now: Instant) -> Result {
        let timeout = self.idle_timeout;
        let timed_out = self
            .connections
            .iter()
            .filter(|(_, conn)| conn.is_timed_out(now, timeout))
            .map(|(key, _)| key)
            .collect::<Vec<_>>();

        // Clean up timed out connections
        for key in timed_out {
            debug!("Closing idle connection");
            self.close(key)?;
        }
        Ok(())
    }

    /// Stops accepting connections and starts draining the existing ones.
    ///
    /// Listeners and connections waiting for a request are closed right away,
    /// while responses that are being written are completed first.
    fn drain(&mut self) -> Result {
        info!("Stopping server");
        self.stopping = true;
        for mut acceptor in self.acceptors.drain(..) {
            self.events.registry().deregister(&mut acceptor)?;
        }

        // Close idle connections, and let the others finish
        let idle = self
            .connections
            .iter_mut()
            .filter_map(|(key, conn)| {
                conn.close_after_write();
                (!conn.is_writing()).then_some(key)
            })
            .collect::<Vec<_>>();
        for key in idle {
            self.close(key)?;
        }
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
