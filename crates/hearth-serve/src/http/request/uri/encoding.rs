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

//! Percent-decoding.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

use crate::http::request::{Error, Result};

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Decodes a percent-encoded request path.
///
/// Unlike [`percent_decode_str`], which passes malformed escapes through as
/// they are, decoding is strict: every `%` must be followed by two hex digits,
/// and the decoded bytes must form valid UTF-8. A `+` is not treated as space,
/// since that convention only applies to query strings.
pub fn decode(value: &str) -> Result<Cow<'_, str>> {
    let bytes = value.as_bytes();
    let mut start = 0;
    while let Some(offset) = value[start..].find('%') {
        let n = start + offset;
        let valid = bytes
            .get(n + 1..n + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(Error::Decode(value.to_string()));
        }
        start = n + 3;
    }

    // All escapes are well-formed, so only the UTF-8 check remains
    percent_decode_str(value)
        .decode_utf8()
        .map_err(|_| Error::Decode(value.to_string()))
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
