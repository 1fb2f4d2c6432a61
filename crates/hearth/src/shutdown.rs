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

//! Shutdown controller.

use hearth_serve::server::Stopper;
use std::io;

#[cfg(unix)]
use signal_hook::consts::SIGINT;
#[cfg(unix)]
use signal_hook::iterator::{Handle, Signals};
#[cfg(unix)]
use std::thread::{self, JoinHandle};
#[cfg(unix)]
use tracing::info;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Shutdown controller.
///
/// The controller listens for interrupt signals on a dedicated thread, and
/// asks the server to stop every time one is delivered. Stopping is
/// idempotent, so repeated signals are harmless. Dropping the controller
/// stops listening and joins the thread.
///
/// Signals are only supported on Unix. On other platforms, installing the
/// controller does nothing.
#[derive(Debug)]
pub struct ShutdownController {
    /// Signal iterator handle and listener thread.
    #[cfg(unix)]
    inner: Option<(Handle, JoinHandle<()>)>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl ShutdownController {
    /// Installs the controller, stopping the server on `SIGINT`.
    #[cfg(unix)]
    pub fn install(stopper: Stopper) -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT])?;
        let handle = signals.handle();
        let thread = thread::Builder::new()
            .name(String::from("hearth-signals"))
            .spawn(move || {
                for signal in signals.forever() {
                    info!("Received signal {signal}, stopping server");
                    stopper.stop();
                }
            })?;

        // Return controller
        Ok(Self { inner: Some((handle, thread)) })
    }

    /// Installs the controller, which is a no-op on this platform.
    #[cfg(not(unix))]
    #[allow(clippy::unnecessary_wraps)]
    pub fn install(stopper: Stopper) -> io::Result<Self> {
        drop(stopper);
        Ok(Self {})
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Drop for ShutdownController {
    /// Stops listening for signals and joins the listener thread.
    fn drop(&mut self) {
        #[cfg(unix)]
        if let Some((handle, thread)) = self.inner.take() {
            handle.close();
            let _ = thread.join();
        }
    }
}
