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

//! Shutdown on interrupt.
//!
//! This test raises `SIGINT` in the test process, which is why it lives in a
//! test binary of its own.

#![cfg(unix)]

use hearth::{Dispatcher, ServerConfig, ShutdownController};
use hearth_serve::server::Server;
use signal_hook::consts::SIGINT;
use signal_hook::low_level::raise;
use std::net::TcpStream;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[test]
fn test_interrupt_stops_server() {
    let dir = TempDir::new().expect("tempdir");
    let config = ServerConfig {
        root: dir.path().to_path_buf(),
        ..ServerConfig::default()
    };
    let config = Arc::new(config.canonicalize().expect("canonicalizes"));
    let mut server = Server::new(Dispatcher::new(config), "127.0.0.1:0")
        .expect("binds");
    let addr = server.local_addrs().expect("addrs")[0];

    // Install controller before the server starts running
    let controller =
        ShutdownController::install(server.stopper()).expect("installs");
    let (tx, rx) = mpsc::channel();
    let thread = thread::spawn(move || {
        let res = server.run();
        let _ = tx.send(());
        res
    });
    TcpStream::connect(addr).expect("connects");

    // Deliver the signal twice, which must be harmless
    raise(SIGINT).expect("raises");
    raise(SIGINT).expect("raises");
    rx.recv_timeout(Duration::from_secs(10)).expect("stops in time");
    thread.join().expect("joins").expect("runs");
    assert!(TcpStream::connect(addr).is_err());

    // Dropping the controller joins the signal thread
    drop(controller);
}
