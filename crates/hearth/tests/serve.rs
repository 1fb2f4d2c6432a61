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

//! End-to-end tests over TCP.

use hearth::{Dispatcher, ServerConfig};
use hearth_serve::server::{Result, Server, Stopper};
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Server running on an ephemeral port, serving a temporary document root.
struct Harness {
    /// Document root.
    dir: TempDir,
    /// Address the server is listening on.
    addr: SocketAddr,
    /// Stopper of the server.
    stopper: Stopper,
    /// Thread running the server.
    thread: Option<JoinHandle<Result>>,
}

/// Parsed response.
struct Reply {
    /// Status line and headers.
    head: String,
    /// Body.
    body: Vec<u8>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Harness {
    /// Creates the document root with the given setup and starts a server.
    fn start<F>(setup: F) -> Self
    where
        F: FnOnce(&Path),
    {
        let idle_timeout = ServerConfig::default().idle_timeout;
        Self::start_with_idle_timeout(setup, idle_timeout)
    }

    /// Starts a server closing connections after the given idle timeout.
    fn start_with_idle_timeout<F>(setup: F, idle_timeout: Duration) -> Self
    where
        F: FnOnce(&Path),
    {
        let dir = TempDir::new().expect("tempdir");
        setup(dir.path());
        let config = ServerConfig {
            root: dir.path().to_path_buf(),
            addr: String::from("127.0.0.1:0"),
            idle_timeout,
            ..ServerConfig::default()
        };
        let config = Arc::new(config.canonicalize().expect("canonicalizes"));
        let dispatcher = Dispatcher::new(Arc::clone(&config));
        let mut server = Server::builder(dispatcher)
            .bind(config.addr.as_str())
            .expect("resolves")
            .idle_timeout(config.idle_timeout)
            .listen()
            .expect("binds");
        let addr = server.local_addrs().expect("addrs")[0];
        let stopper = server.stopper();
        let thread = Some(thread::spawn(move || server.run()));
        Self { dir, addr, stopper, thread }
    }

    /// Sends a request, closing the connection, and reads the response.
    fn send(&self, method: &str, path: &str) -> Reply {
        let mut stream = TcpStream::connect(self.addr).expect("connects");
        let req = format!(
            "{method} {path} HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n"
        );
        stream.write_all(req.as_bytes()).expect("writes");
        let mut data = Vec::new();
        stream.read_to_end(&mut data).expect("reads");
        Reply::parse(&data)
    }

    /// Stops the server and waits for it to finish.
    fn stop(&mut self) {
        self.stopper.stop();
        if let Some(thread) = self.thread.take() {
            thread.join().expect("joins").expect("runs");
        }
    }
}

impl Reply {
    /// Splits the given data into head and body.
    fn parse(data: &[u8]) -> Self {
        let n = data
            .windows(4)
            .position(|window| window == b"\r\n\r\n")
            .expect("complete head");
        let head = String::from_utf8(data[..n + 4].to_vec()).expect("utf-8");
        Self { head, body: data[n + 4..].to_vec() }
    }

    /// Returns the value of the given header.
    fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().find_map(|line| {
            let (key, value) = line.split_once(": ")?;
            key.eq_ignore_ascii_case(name).then_some(value)
        })
    }

    /// Returns the status line.
    fn status(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// Returns the body as text.
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Drop for Harness {
    fn drop(&mut self) {
        self.stopper.stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Creates a small site.
fn site(root: &Path) {
    fs::write(root.join("a.txt"), "hello").expect("writes");
    fs::write(root.join("style.css.gz"), [0x1f, 0x8b, 0x08, 0x00])
        .expect("writes");
    fs::create_dir(root.join("docs")).expect("creates");
    fs::write(root.join("docs/a.html"), "<p>a</p>").expect("writes");
    fs::write(root.join("docs/b.html"), "<p>b</p>").expect("writes");
    fs::create_dir(root.join("home")).expect("creates");
    fs::write(root.join("home/index.html"), "<h1>home</h1>").expect("writes");
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[test]
fn test_get_file() {
    let harness = Harness::start(site);
    let reply = harness.send("GET", "/a.txt");
    assert_eq!(reply.status(), "HTTP/1.1 200 OK");
    assert_eq!(reply.header("Content-Type"), Some("text/plain"));
    assert_eq!(reply.header("Content-Length"), Some("5"));
    assert!(reply.header("Date").is_some());
    assert!(reply.header("Last-Modified").is_some());
    assert_eq!(reply.body, b"hello");
}

#[test]
fn test_head_file() {
    let harness = Harness::start(site);
    let reply = harness.send("HEAD", "/a.txt");
    assert_eq!(reply.status(), "HTTP/1.1 200 OK");
    assert_eq!(reply.header("Content-Length"), Some("5"));
    assert!(reply.body.is_empty());
}

#[test]
fn test_gzip_sibling() {
    let harness = Harness::start(site);
    let reply = harness.send("GET", "/style.css");
    assert_eq!(reply.status(), "HTTP/1.1 200 OK");
    assert_eq!(reply.header("Content-Encoding"), Some("gzip"));
    assert_eq!(reply.header("Content-Type"), Some("text/css"));
    assert_eq!(reply.body, [0x1f, 0x8b, 0x08, 0x00]);
}

#[test]
fn test_index_file() {
    let harness = Harness::start(site);
    let reply = harness.send("GET", "/home/");
    assert_eq!(reply.header("Content-Type"), Some("text/html"));
    assert_eq!(reply.text(), "<h1>home</h1>");
}

#[test]
fn test_directory_listing() {
    let harness = Harness::start(site);
    let reply = harness.send("GET", "/docs/");
    assert_eq!(reply.status(), "HTTP/1.1 200 OK");
    assert_eq!(reply.header("Content-Type"), Some("text/html"));
    let len = reply.body.len().to_string();
    assert_eq!(reply.header("Content-Length"), Some(len.as_str()));
    let html = reply.text();
    assert!(html.contains(r#"<a href="..">..</a>"#));
    assert!(html.contains(r#"<a href="a.html">a.html</a>"#));
    assert!(html.contains(r#"<a href="b.html">b.html</a>"#));
}

#[test]
fn test_root_listing_has_no_parent() {
    let harness = Harness::start(site);
    let html = harness.send("GET", "/").text();
    assert!(html.contains(r#"<a href="a.txt">a.txt</a>"#));
    assert!(!html.contains(r#"<a href="..">"#));
    assert!(!html.contains(r#"<a href=".">"#));
}

#[test]
fn test_traversal() {
    let harness = Harness::start(site);
    for path in ["/../../etc/passwd", "/docs/../a.txt", "/%2e%2e/a.txt"] {
        let reply = harness.send("GET", path);
        assert_eq!(reply.status(), "HTTP/1.1 404 Not Found", "for: {path}");
    }
}

#[test]
fn test_malformed_path() {
    let harness = Harness::start(site);
    let reply = harness.send("GET", "/a%zz.txt");
    assert_eq!(reply.status(), "HTTP/1.1 400 Bad Request");
}

#[test]
fn test_method_not_allowed() {
    let harness = Harness::start(site);
    let reply = harness.send("POST", "/a.txt");
    assert_eq!(reply.status(), "HTTP/1.1 405 Method Not Allowed");
    assert_eq!(reply.header("Allow"), Some("GET, HEAD"));
}

#[test]
fn test_keep_alive_is_idempotent() {
    let harness = Harness::start(site);
    let mut stream = TcpStream::connect(harness.addr).expect("connects");
    let mut replies = Vec::new();
    for _ in 0..2 {
        stream
            .write_all(b"GET /docs/a.html HTTP/1.1\r\nHost: test\r\n\r\n")
            .expect("writes");

        // Read until the head is complete, then read the announced body
        let mut data = Vec::new();
        let mut byte = [0u8; 1];
        while !data.ends_with(b"\r\n\r\n") {
            stream.read_exact(&mut byte).expect("reads");
            data.push(byte[0]);
        }
        let reply = Reply::parse(&data);
        let len: usize = reply
            .header("Content-Length")
            .and_then(|len| len.parse().ok())
            .expect("length");
        let mut body = vec![0u8; len];
        stream.read_exact(&mut body).expect("reads");
        replies.push(body);
    }
    assert_eq!(replies[0], b"<p>a</p>");
    assert_eq!(replies[0], replies[1]);
}

#[test]
fn test_stop_completes_slow_stream() {
    const SIZE: usize = 32 * 1024 * 1024;
    let mut harness = Harness::start(|root| {
        fs::write(root.join("large.bin"), vec![7u8; SIZE]).expect("writes");
    });

    // Start streaming the file, but only read a small part of it, so the
    // response is still being written when the server is stopped
    let mut stream = TcpStream::connect(harness.addr).expect("connects");
    stream
        .write_all(b"GET /large.bin HTTP/1.1\r\nHost: test\r\n\r\n")
        .expect("writes");
    let mut start = [0u8; 1024];
    stream.read_exact(&mut start).expect("reads");
    harness.stopper.stop();

    // The response must still complete, after which the server exits
    let mut data = start.to_vec();
    stream.read_to_end(&mut data).expect("reads");
    let reply = Reply::parse(&data);
    assert_eq!(reply.header("Content-Length"), Some("33554432"));
    assert_eq!(reply.body.len(), SIZE);
    assert!(reply.body.iter().all(|&byte| byte == 7));

    // No new connections are accepted
    let addr = harness.addr;
    harness.stop();
    assert!(TcpStream::connect(addr).is_err());
    assert!(harness.dir.path().join("large.bin").exists());
}

#[test]
fn test_idle_timeout_spares_stalled_reader() {
    const SIZE: usize = 32 * 1024 * 1024;
    let timeout = Duration::from_millis(300);
    let mut harness = Harness::start_with_idle_timeout(
        |root| {
            fs::write(root.join("large.bin"), vec![3u8; SIZE]).expect("writes");
            fs::write(root.join("a.txt"), "hello").expect("writes");
        },
        timeout,
    );

    // Start streaming the file, then stop reading for longer than the idle
    // timeout, while another connection doesn't send anything at all
    let mut stream = TcpStream::connect(harness.addr).expect("connects");
    stream
        .write_all(
            b"GET /large.bin HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n",
        )
        .expect("writes");
    let mut start = [0u8; 1024];
    stream.read_exact(&mut start).expect("reads");
    let mut idle = TcpStream::connect(harness.addr).expect("connects");
    thread::sleep(timeout * 3);

    // Another request makes the server look for idle connections
    let reply = harness.send("GET", "/a.txt");
    assert_eq!(reply.text(), "hello");

    // The idle connection is closed, but the response is written in full
    idle.set_read_timeout(Some(Duration::from_secs(5)))
        .expect("sets timeout");
    let mut buffer = [0u8; 1];
    assert_eq!(idle.read(&mut buffer).expect("reads"), 0);
    let mut data = start.to_vec();
    stream.read_to_end(&mut data).expect("reads");
    let reply = Reply::parse(&data);
    assert_eq!(reply.body.len(), SIZE);
    assert!(reply.body.iter().all(|&byte| byte == 3));
    harness.stop();
}
