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

//! Path resolver.

use hearth_serve::http::Uri;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::{Error, Result};
use super::mime;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Separators stripped from the start of the decoded request path.
#[cfg(not(windows))]
const SEPARATORS: &[char] = &['/'];

/// Separators stripped from the start of the decoded request path.
#[cfg(windows)]
const SEPARATORS: &[char] = &['/', '\\'];

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Resolved path.
///
/// A resolved path is the canonical location of a request path below the
/// document root. Since resolution rejects every path containing `..`, the
/// canonical path can only escape the root through symbolic links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Canonical path.
    pub path: PathBuf,
    /// Whether the gzip sibling was substituted.
    pub gzip: bool,
    /// Percent-decoded request path.
    pub decoded: String,
    /// Request path joined onto the root, before canonicalization.
    pub joined: PathBuf,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl ResolvedPath {
    /// Returns the content type of the resolved path.
    ///
    /// The type is derived from the requested name, and not from the canonical
    /// path, so a gzip sibling is classified without its `.gz` suffix, and
    /// symbolic links are classified by their own name.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        mime::content_type(&self.joined.to_string_lossy())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Resolves the raw request path below the given document root.
///
/// The path is percent-decoded, and rejected if it contains `..` anywhere,
/// which also forbids harmless names like `a..b`. It's then joined onto the
/// root and canonicalized. If that fails, the gzip sibling, i.e., the path
/// with `.gz` appended, is tried instead.
///
/// # Errors
///
/// This function returns [`Error::Decode`] for malformed escapes,
/// [`Error::Traversal`] if the path contains `..`, and [`Error::NotFound`] if
/// neither the path nor its gzip sibling can be canonicalized.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use hearth::resolve::resolve;
/// use std::env;
///
/// // Resolve the working directory itself
/// let root = env::current_dir()?.canonicalize()?;
/// let resolved = resolve(&root, "/")?;
/// assert_eq!(resolved.path, root);
/// # Ok(())
/// # }
/// ```
pub fn resolve(root: &Path, raw: &str) -> Result<ResolvedPath> {
    let uri = Uri::from(raw);
    let decoded = uri
        .decode_path()
        .map_err(|_| Error::Decode(raw.to_string()))?
        .into_owned();
    if decoded.contains("..") {
        return Err(Error::Traversal(decoded));
    }

    // Strip leading separators, as joining an absolute path would replace
    // the root instead of appending to it
    let joined = root.join(decoded.trim_start_matches(SEPARATORS));
    if let Ok(path) = joined.canonicalize() {
        return Ok(ResolvedPath { path, gzip: false, decoded, joined });
    }

    // Fall back to the precompressed sibling
    let mut sibling = OsString::from(joined.as_os_str());
    sibling.push(".gz");
    match Path::new(&sibling).canonicalize() {
        Ok(path) => Ok(ResolvedPath { path, gzip: true, decoded, joined }),
        Err(_) => Err(Error::NotFound(joined)),
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;

    use super::*;

    /// Creates a document root with a few files.
    fn fixture() -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path().canonicalize().expect("canonicalizes");
        fs::write(root.join("a.txt"), "hello").expect("writes");
        fs::write(root.join("hello world.txt"), "spaced").expect("writes");
        fs::write(root.join("b.css.gz"), [0x1f, 0x8b]).expect("writes");
        fs::create_dir(root.join("docs")).expect("creates");
        (dir, root)
    }

    #[test]
    fn test_resolve_file() {
        let (_dir, root) = fixture();
        let resolved = resolve(&root, "/a.txt").expect("resolves");
        assert_eq!(resolved.path, root.join("a.txt"));
        assert!(!resolved.gzip);
        assert_eq!(resolved.decoded, "/a.txt");
        assert_eq!(resolved.content_type(), "text/plain");
    }

    #[test]
    fn test_resolve_decodes() {
        let (_dir, root) = fixture();
        let resolved = resolve(&root, "/hello%20world.txt").expect("resolves");
        assert_eq!(resolved.path, root.join("hello world.txt"));
        assert_eq!(resolved.decoded, "/hello world.txt");
    }

    #[test]
    fn test_resolve_never_duplicates_separators() {
        let (_dir, root) = fixture();
        let resolved = resolve(&root, "//docs").expect("resolves");
        assert_eq!(resolved.joined, root.join("docs"));
        assert_eq!(resolved.path, root.join("docs"));
    }

    #[test]
    fn test_resolve_gzip_sibling() {
        let (_dir, root) = fixture();
        let resolved = resolve(&root, "/b.css").expect("resolves");
        assert_eq!(resolved.path, root.join("b.css.gz"));
        assert!(resolved.gzip);
        assert_eq!(resolved.content_type(), "text/css");
    }

    #[test]
    fn test_resolve_traversal() {
        let (_dir, root) = fixture();
        for raw in ["/../../etc/passwd", "/docs/%2e%2e/a.txt", "/a..b"] {
            assert!(
                matches!(resolve(&root, raw), Err(Error::Traversal(_))),
                "Failed for: {raw}"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_keeps_leading_backslash() {
        let (_dir, root) = fixture();
        let res = resolve(&root, "/%5Ca.txt");
        assert!(matches!(res, Err(Error::NotFound(_))));
        fs::write(root.join("\\a.txt"), "escaped").expect("writes");
        let resolved = resolve(&root, "/%5Ca.txt").expect("resolves");
        assert_eq!(resolved.path, root.join("\\a.txt"));
    }

    #[test]
    fn test_resolve_malformed() {
        let (_dir, root) = fixture();
        let res = resolve(&root, "/a%zz.txt");
        assert!(matches!(res, Err(Error::Decode(_))));
    }

    #[test]
    fn test_resolve_not_found() {
        let (_dir, root) = fixture();
        let res = resolve(&root, "/missing.txt");
        assert!(matches!(res, Err(Error::NotFound(_))));
    }
}
