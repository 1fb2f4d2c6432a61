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

//! HTTP connection.

use httpdate::fmt_http_date;
use mio::Interest;
use mio::net::TcpStream;
use std::fs::File;
use std::io::{self, Cursor, ErrorKind, Read, Take, Write};
use std::mem;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, warn};

use crate::handler::Handler;
use crate::http::request::Error;
use crate::http::response::ResponseExt;
use crate::http::{Body, Header, Request, Response, Status};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Size of a chunk read from a file body at once.
const CHUNK_SIZE: usize = 64 * 1024;

/// Size of a single read from the socket.
const READ_SIZE: usize = 4 * 1024;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Connection action after handling an event
#[derive(Debug, PartialEq, Eq)]
pub enum Signal {
    /// Continue with the specified interest.
    Interest(Interest),
    /// Continue without changing the current interest.
    Continue,
    /// Connection was closed.
    Close,
}

// ----------------------------------------------------------------------------

/// Internal buffer state.
#[derive(Debug)]
enum Buffer {
    /// Currently reading data.
    Reading(Vec<u8>),
    /// Currently writing data.
    Writing(Outgoing),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Outgoing response.
///
/// The cursor holds the serialized head, including in-memory bodies, and is
/// refilled from the file, if any, once it's exhausted.
#[derive(Debug)]
struct Outgoing {
    /// Bytes to write.
    cursor: Cursor<Vec<u8>>,
    /// Remaining file body.
    file: Option<Take<File>>,
}

// ----------------------------------------------------------------------------

/// HTTP connection.
#[derive(Debug)]
pub struct Connection {
    /// TCP socket.
    socket: TcpStream,
    /// Read/write buffer.
    buffer: Buffer,
    /// Last activity time.
    time: Instant,
    /// Whether to close the connection once the response is written.
    closing: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Connection {
    /// Creates a connection.
    pub fn new(socket: TcpStream) -> Self {
        Connection {
            socket,
            buffer: Buffer::Reading(Vec::new()),
            time: Instant::now(),
            closing: false,
        }
    }

    /// Consumes the connection and returns the underlying socket.
    pub fn into_socket(self) -> TcpStream {
        self.socket
    }

    /// Returns a mutable reference to the underlying socket.
    pub fn socket(&mut self) -> &mut TcpStream {
        &mut self.socket
    }

    /// Attempt to read data from the socket.
    ///
    /// Data is read until the socket would block or a complete request was
    /// received, which is then handed to the handler, switching to writing.
    pub fn read<H>(&mut self, handler: &H) -> Signal
    where
        H: Handler,
    {
        let Buffer::Reading(buffer) = &mut self.buffer else {
            return Signal::Continue;
        };
        self.time = Instant::now();

        // Read until we've got a complete request, or the socket would block,
        // which means we wait for the next readable event
        let mut temp = [0u8; READ_SIZE];
        let (res, close) = loop {
            match self.socket.read(&mut temp) {
                Ok(0) => return Signal::Close,
                Ok(bytes) => buffer.extend_from_slice(&temp[..bytes]),
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    return Signal::Continue;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    report(&err);
                    return Signal::Close;
                }
            }

            // Try to parse the request, and if it's complete, hand it to the
            // handler. Failing requests get an error, and the connection is
            // closed afterwards, as we can't tell where the next one starts
            match Request::from_bytes(buffer) {
                Ok(req) => {
                    let close = req.headers.wants_close();
                    break (handler.handle(req), close);
                }
                Err(Error::Incomplete) => {}
                Err(Error::Validation(status)) => {
                    break (Response::from_status(status), true);
                }
                Err(err) => {
                    debug!("Malformed request: {err}");
                    break (Response::from_status(Status::BadRequest), true);
                }
            }
        };

        // Serialize the response, and switch to writing
        let res = res.header(Header::Date, fmt_http_date(SystemTime::now()));
        let (head, body) = res.into_parts();
        let file = match body {
            Body::File(file, len) => Some(file.take(len)),
            Body::Bytes(_) => None,
        };
        self.closing |= close;
        self.buffer = Buffer::Writing(Outgoing {
            cursor: Cursor::new(head),
            file,
        });
        Signal::Interest(Interest::WRITABLE)
    }

    /// Attempt to write data to the socket.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write(&mut self) -> Signal {
        let Buffer::Writing(outgoing) = &mut self.buffer else {
            return Signal::Continue;
        };
        self.time = Instant::now();

        // We try to write all remaining data - if the connection would block,
        // we return and wait for the next writable event
        loop {
            let pos = outgoing.cursor.position() as usize;
            if pos >= outgoing.cursor.get_ref().len() {
                match outgoing.refill() {
                    Ok(true) => continue,
                    Ok(false) => break,
                    Err(err) => {
                        warn!("Failed to read response body: {err}");
                        return Signal::Close;
                    }
                }
            }

            // Attempt to write remaining bytes
            let buffer = outgoing.cursor.get_ref();
            match self.socket.write(&buffer[pos..]) {
                Ok(0) => return Signal::Close,
                Ok(bytes) => {
                    outgoing.cursor.set_position((pos + bytes) as u64);
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    return Signal::Continue;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => {
                    report(&err);
                    return Signal::Close;
                }
            }
        }

        // The response is complete, so either close the connection or switch
        // back to reading the next request
        if self.closing {
            return Signal::Close;
        }
        self.buffer = Buffer::Reading(Vec::new());
        Signal::Interest(Interest::READABLE)
    }

    /// Marks the connection to be closed once the current response is written.
    pub fn close_after_write(&mut self) {
        self.closing = true;
    }

    /// Returns whether the connection is currently writing data.
    pub fn is_writing(&self) -> bool {
        matches!(self.buffer, Buffer::Writing(_))
    }

    /// Returns whether the connection was idle longer than the given timeout.
    ///
    /// A connection with a response in flight is never idle, even if the
    /// client stopped reading, as closing it would truncate the response.
    pub fn is_timed_out(&self, now: Instant, timeout: Duration) -> bool {
        !self.is_writing() && now.duration_since(self.time) > timeout
    }
}

impl Outgoing {
    /// Refills the cursor with the next chunk of the file.
    ///
    /// Returns `false` if there's nothing left to write. A file that ends
    /// before the announced length is an error, since the `Content-Length`
    /// can't be satisfied anymore.
    fn refill(&mut self) -> io::Result<bool> {
        let Some(file) = &mut self.file else {
            return Ok(false);
        };
        if file.limit() == 0 {
            self.file = None;
            return Ok(false);
        }

        // Reuse the allocation of the previous chunk
        let mut chunk = mem::take(self.cursor.get_mut());
        chunk.clear();
        file.by_ref().take(CHUNK_SIZE as u64).read_to_end(&mut chunk)?;
        if chunk.is_empty() {
            return Err(ErrorKind::UnexpectedEof.into());
        }
        self.cursor = Cursor::new(chunk);
        Ok(true)
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Reports a socket error, unless it's an expected disconnect.
fn report(err: &io::Error) {
    match err.kind() {
        ErrorKind::ConnectionReset
        | ErrorKind::ConnectionAborted
        | ErrorKind::BrokenPipe
        | ErrorKind::UnexpectedEof => debug!("Client disconnected: {err}"),
        _ => warn!("Socket error: {err}"),
    }
}
