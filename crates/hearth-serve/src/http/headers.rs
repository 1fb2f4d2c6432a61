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

//! HTTP headers.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::collections::btree_map::Iter;
use std::fmt;

use super::Header;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// HTTP headers.
///
/// The same map is used for requests and responses. Request headers borrow
/// their values from the buffer the request was parsed from, so parsing does
/// not allocate per header, while response headers are `Headers<'static>`,
/// holding either static strings or owned values, so responses can outlive
/// the request they answer.
///
/// Keys are small integers, which is why a [`BTreeMap`] is used, and which
/// also means headers are always serialized in the same order.
///
/// # Examples
///
/// ```
/// use hearth_serve::http::{Header, Headers};
///
/// // Create header map and add headers
/// let mut headers = Headers::new();
/// headers.insert(Header::Host, "localhost");
/// headers.insert(Header::ContentLength, 5.to_string());
/// assert_eq!(headers.get(Header::Host), Some("localhost"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Headers<'a> {
    /// Ordered map of headers.
    inner: BTreeMap<Header, Cow<'a, str>>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> Headers<'a> {
    /// Creates a header map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { inner: BTreeMap::new() }
    }

    /// Returns the value for the given header.
    #[inline]
    #[must_use]
    pub fn get(&self, header: Header) -> Option<&str> {
        self.inner.get(&header).map(AsRef::as_ref)
    }

    /// Returns whether the header is contained.
    #[inline]
    #[must_use]
    pub fn contains(&self, header: Header) -> bool {
        self.inner.contains_key(&header)
    }

    /// Sets the given header, replacing any previous value.
    #[inline]
    pub fn insert<V>(&mut self, header: Header, value: V)
    where
        V: Into<Cow<'a, str>>,
    {
        self.inner.insert(header, value.into());
    }

    /// Removes the given header.
    #[inline]
    pub fn remove(&mut self, header: Header) {
        self.inner.remove(&header);
    }

    /// Returns an iterator over the headers, ordered by header.
    #[inline]
    pub fn iter(&self) -> Iter<'_, Header, Cow<'a, str>> {
        self.inner.iter()
    }

    /// Returns whether the client asked to close the connection.
    ///
    /// # Examples
    ///
    /// ```
    /// use hearth_serve::http::{Header, Headers};
    ///
    /// // Create header map from iterator
    /// let headers = Headers::from_iter([(Header::Connection, "Close")]);
    /// assert!(headers.wants_close());
    /// ```
    #[must_use]
    pub fn wants_close(&self) -> bool {
        self.get(Header::Connection).is_some_and(|value| {
            value
                .split(',')
                .any(|token| token.trim().eq_ignore_ascii_case("close"))
        })
    }
}

#[allow(clippy::must_use_candidate)]
impl Headers<'_> {
    /// Returns the number of headers.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether there are any headers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<'a> FromIterator<(Header, &'a str)> for Headers<'a> {
    /// Creates a header map from an iterator.
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (Header, &'a str)>,
    {
        let mut headers = Headers::new();
        for (header, value) in iter {
            headers.insert(header, value);
        }
        headers
    }
}

impl<'h, 'a> IntoIterator for &'h Headers<'a> {
    type Item = (&'h Header, &'h Cow<'a, str>);
    type IntoIter = Iter<'h, Header, Cow<'a, str>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Headers<'_> {
    /// Formats the header map as it appears on the wire.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (header, value) in &self.inner {
            write!(f, "{header}: {value}\r\n")?;
        }

        // No errors occurred
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_and_orders() {
        let mut headers = Headers::new();
        headers.insert(Header::LastModified, "x");
        headers.insert(Header::ContentType, "text/plain");
        headers.insert(Header::ContentType, String::from("text/html"));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get(Header::ContentType), Some("text/html"));
        assert_eq!(
            headers.to_string(),
            "Content-Type: text/html\r\nLast-Modified: x\r\n"
        );
    }

    #[test]
    fn test_wants_close() {
        let test_cases = vec![
            ("close", true),
            ("keep-alive, Close", true),
            ("keep-alive", false),
            ("closed", false),
        ];
        for (value, expected) in test_cases {
            let headers = Headers::from_iter([(Header::Connection, value)]);
            assert_eq!(headers.wants_close(), expected, "Failed for: {value}");
        }
        assert!(!Headers::new().wants_close());
    }
}
