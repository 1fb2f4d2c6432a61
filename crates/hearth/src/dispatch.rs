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

//! Request dispatcher.

use hearth_serve::handler::Handler;
use hearth_serve::http::response::ResponseExt;
use hearth_serve::http::{Request, Response};
use std::sync::Arc;
use tracing::{debug, error};

use super::config::ServerConfig;
use super::responder;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Request dispatcher.
///
/// The dispatcher is the handler the server invokes for every request. It
/// delegates to the file responder and converts all errors into responses,
/// so every request is answered exactly once. Server errors are answered
/// with an empty body, and are logged instead.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    /// Server configuration.
    config: Arc<ServerConfig>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Dispatcher {
    /// Creates a dispatcher.
    ///
    /// The document root of the given configuration must be canonicalized.
    #[must_use]
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self { config }
    }

    /// Returns the server configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Handler for Dispatcher {
    /// Handles the given request.
    fn handle(&self, req: Request) -> Response {
        let res = match responder::respond(&self.config.root, &req) {
            Ok(res) => res,
            Err(err) => {
                let status = err.status();
                if status.is_server_error() {
                    error!("{} {}: {err}", req.method, req.uri.path);
                    Response::empty(status)
                } else {
                    debug!("{} {}: {err}", req.method, req.uri.path);
                    Response::from_status(status)
                }
            }
        };
        debug!(
            method = %req.method,
            path = %req.uri.path,
            status = res.status.code(),
            "Handled request"
        );
        res
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use hearth_serve::http::{Header, Method, Status};
    use std::fs;
    use tempfile::TempDir;

    use super::*;

    /// Creates a dispatcher for a temporary document root.
    fn fixture() -> (TempDir, Dispatcher) {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("a.txt"), "hello").expect("writes");
        let config = ServerConfig {
            root: dir.path().to_path_buf(),
            ..ServerConfig::default()
        };
        let config = config.canonicalize().expect("canonicalizes");
        (dir, Dispatcher::new(Arc::new(config)))
    }

    #[test]
    fn test_handle() {
        let (_dir, dispatcher) = fixture();
        let res = dispatcher.handle(Request::new().uri("/a.txt"));
        assert_eq!(res.status, Status::Ok);
        assert_eq!(res.body.into_bytes().expect("reads"), b"hello");
    }

    #[test]
    fn test_handle_is_idempotent() {
        let (_dir, dispatcher) = fixture();
        let first = dispatcher.handle(Request::new().uri("/a.txt"));
        let second = dispatcher.handle(Request::new().uri("/a.txt"));
        assert_eq!(
            first.headers.get(Header::ContentLength),
            second.headers.get(Header::ContentLength)
        );
        assert_eq!(
            first.body.into_bytes().expect("reads"),
            second.body.into_bytes().expect("reads")
        );
    }

    #[test]
    fn test_handle_client_error() {
        let (_dir, dispatcher) = fixture();
        let res = dispatcher.handle(Request::new().uri("/missing"));
        assert_eq!(res.status, Status::NotFound);
        let res = dispatcher.handle(Request::new().uri("/%"));
        assert_eq!(res.status, Status::BadRequest);
        let req = Request::new().method(Method::Delete).uri("/a.txt");
        assert_eq!(dispatcher.handle(req).status, Status::MethodNotAllowed);
    }

    #[cfg(unix)]
    #[test]
    fn test_handle_server_error_has_empty_body() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, dispatcher) = fixture();
        let path = dir.path().join("secret.txt");
        fs::write(&path, "secret").expect("writes");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000))
            .expect("restricts");

        // Privileged users can open the file regardless of permissions
        if fs::File::open(&path).is_ok() {
            return;
        }
        let res = dispatcher.handle(Request::new().uri("/secret.txt"));
        assert_eq!(res.status, Status::InternalServerError);
        assert_eq!(res.headers.get(Header::ContentLength), Some("0"));
        assert!(res.body.is_empty());
    }
}
