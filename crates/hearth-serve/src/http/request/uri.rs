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

//! HTTP request URI.

use std::borrow::Cow;
use std::fmt;

use super::Result;

mod encoding;

use encoding::decode;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP request URI.
///
/// This is a lightweight URI representation for origin-form request targets,
/// i.e., a path that starts with a `/`, optionally followed by a query string.
/// The path is kept exactly as it was received, since handlers might need the
/// raw form, e.g., to compute relative links. Use [`Uri::decode_path`] to
/// obtain the percent-decoded path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uri<'a> {
    /// Request path, as received.
    pub path: Cow<'a, str>,
    /// Query string, if any.
    pub query: Option<Cow<'a, str>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Uri<'a> {
    /// Creates a request URI.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the percent-decoded request path.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Decode`][], if the path contains malformed
    /// escapes, or if the decoded path is not valid UTF-8.
    ///
    /// [`Error::Decode`]: crate::http::request::Error::Decode
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use hearth_serve::http::Uri;
    ///
    /// // Create request URI and decode path
    /// let uri = Uri::from("/hello%20world.txt?download=1");
    /// assert_eq!(uri.decode_path()?, "/hello world.txt");
    /// # Ok(())
    /// # }
    /// ```
    pub fn decode_path(&self) -> Result<Cow<'_, str>> {
        decode(&self.path)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<'a> From<&'a str> for Uri<'a> {
    /// Creates a request URI from a string.
    ///
    /// # Examples
    ///
    /// ```
    /// use hearth_serve::http::Uri;
    ///
    /// // Create request URI from string
    /// let uri = Uri::from("/docs/?sort=name");
    /// assert_eq!(uri.path, "/docs/");
    /// assert_eq!(uri.query.as_deref(), Some("sort=name"));
    /// ```
    fn from(value: &'a str) -> Self {
        match value.split_once('?') {
            Some((path, query)) => Uri {
                path: Cow::Borrowed(path),
                query: Some(Cow::Borrowed(query)),
            },
            None => Uri { path: Cow::Borrowed(value), query: None },
        }
    }
}

// ----------------------------------------------------------------------------

impl Default for Uri<'_> {
    /// Creates a default request URI pointing to `/`.
    #[inline]
    fn default() -> Self {
        Uri { path: Cow::Borrowed("/"), query: None }
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Uri<'_> {
    /// Formats the request URI for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;

        // Write query string, if any
        if let Some(query) = &self.query {
            f.write_str("?")?;
            f.write_str(query)?;
        }

        // No errors occurred
        Ok(())
    }
}
