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

//! Poller for I/O events.

use mio::event::Iter;
use mio::{Events, Poll, Registry, Token, Waker};
use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Duration;

use super::error::Result;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Token reserved for the waker.
///
/// Listener tokens count up from zero and connection tokens follow them, so
/// the largest token can never collide with either of them.
pub const WAKER: Token = Token(usize::MAX);

/// Number of events handled per poll.
const CAPACITY: usize = 1024;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Poller for I/O events.
///
/// Owns the event queue of the server, and the waker that stoppers use to
/// interrupt a blocking poll from other threads.
pub struct Poller {
    /// Poll instance.
    inner: Poll,
    /// Events of the last poll.
    events: Events,
    /// Waker, shared with all stoppers.
    waker: Arc<Waker>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Poller {
    /// Creates a poller with a registered waker.
    pub fn new() -> Result<Self> {
        let inner = Poll::new()?;
        let waker = Arc::new(Waker::new(inner.registry(), WAKER)?);
        let events = Events::with_capacity(CAPACITY);
        Ok(Self { inner, events, waker })
    }

    /// Returns the registry for sources.
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry {
        self.inner.registry()
    }

    /// Blocks until events are ready or the timeout elapses.
    ///
    /// A signal arriving during the wait interrupts the system call, which
    /// counts as a poll without events.
    pub fn poll(&mut self, timeout: Option<Duration>) -> Result {
        if let Err(err) = self.inner.poll(&mut self.events, timeout) {
            if err.kind() != ErrorKind::Interrupted {
                return Err(err.into());
            }
            self.events.clear();
        }
        Ok(())
    }

    /// Returns a shared handle to the waker.
    #[inline]
    #[must_use]
    pub fn waker(&self) -> Arc<Waker> {
        Arc::clone(&self.waker)
    }

    /// Returns an iterator over the events of the last poll.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        self.events.iter()
    }
}
