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

//! File responder.

use hearth_serve::http::response::ResponseExt;
use hearth_serve::http::{Body, Header, Method, Request, Response, Status};
use httpdate::fmt_http_date;
use std::fs::{self, File, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::listing;
use super::resolve::{ResolvedPath, resolve};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Name of the file served for directories.
pub const INDEX_FILE: &str = "index.html";

/// Methods answered by the responder.
pub const ALLOWED: &str = "GET, HEAD";

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// What a resolved path is served as.
#[derive(Debug)]
enum Target {
    /// Directory without index file.
    Directory,
    /// Index file of a directory.
    Index(PathBuf, Metadata),
    /// Regular file, or anything else that isn't a directory.
    File(Metadata),
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Answers the given request from the document root.
///
/// Only `GET` and `HEAD` are served, and every other method is answered with
/// "405 Method Not Allowed". Otherwise, the request path is resolved and the
/// result is served as a directory listing, the directory's index file, or as
/// a file, which is streamed by the server. `HEAD` requests receive the same
/// headers as `GET` requests, but never a body.
///
/// # Errors
///
/// This function returns an error for all failures, each of which maps to a
/// status code via [`Error::status`].
pub fn respond(root: &Path, req: &Request) -> Result<Response> {
    let head = match req.method {
        Method::Get => false,
        Method::Head => true,
        _ => {
            return Ok(Response::from_status(Status::MethodNotAllowed)
                .header(Header::Allow, ALLOWED));
        }
    };

    // Resolve path and decide how to serve it
    let resolved = resolve(root, &req.uri.path)?;
    match classify(&resolved)? {
        Target::Directory => directory(&resolved, &req.uri.path, head),
        Target::Index(path, meta) => {
            file(&path, &meta, "text/html", false, head)
        }
        Target::File(meta) => {
            let mime = resolved.content_type();
            file(&resolved.path, &meta, mime, resolved.gzip, head)
        }
    }
}

/// Determines how to serve the resolved path.
fn classify(resolved: &ResolvedPath) -> Result<Target> {
    let meta = fs::metadata(&resolved.path)
        .map_err(|_| Error::NotFound(resolved.path.clone()))?;
    if !meta.is_dir() {
        return Ok(Target::File(meta));
    }

    // Serve the index file, if there's one, but only if it's a regular file,
    // since a directory named like it must be listed instead
    let index = resolved.path.join(INDEX_FILE);
    match fs::metadata(&index) {
        Ok(meta) if meta.is_file() => Ok(Target::Index(index, meta)),
        _ => Ok(Target::Directory),
    }
}

/// Serves a directory listing.
fn directory(
    resolved: &ResolvedPath, raw: &str, head: bool,
) -> Result<Response> {
    let html = listing::render(&resolved.path, raw, &resolved.decoded)?;
    let res = Response::new()
        .header(Header::ContentType, "text/html")
        .header(Header::ContentLength, html.len());
    if head { Ok(res) } else { Ok(res.body(html)) }
}

/// Serves a file.
///
/// The `Content-Length` is always the size the file had when it was stat'd,
/// and the body is limited to it. Empty files are never opened.
fn file(
    path: &Path, meta: &Metadata, mime: &str, gzip: bool, head: bool,
) -> Result<Response> {
    let len = meta.len();
    let mut res = Response::new()
        .header(Header::ContentType, mime)
        .header(Header::ContentLength, len);
    if gzip {
        res = res.header(Header::ContentEncoding, "gzip");
    }
    if let Ok(time) = meta.modified() {
        res = res.header(Header::LastModified, fmt_http_date(time));
    }
    if len == 0 {
        return Ok(res);
    }

    // Open the file, which might have vanished since it was stat'd
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Open { path: path.to_path_buf(), err },
    })?;
    if head {
        Ok(res)
    } else {
        Ok(res.body(Body::file(file, len)))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
