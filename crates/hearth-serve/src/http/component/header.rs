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

//! HTTP header.

tokens! {
    /// HTTP header.
    ///
    /// Only the headers a static file server reads or writes are known.
    /// Unknown request headers are skipped during parsing, which keeps the
    /// header maps small and allows for type-safe access. Variants are
    /// ordered like they're serialized.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use hearth_serve::http::Header;
    ///
    /// // Create header from string, ignoring case
    /// let header: Header = "content-length".parse()?;
    /// assert_eq!(header.name(), "Content-Length");
    /// # Ok(())
    /// # }
    /// ```
    pub enum Header / Header, ignore_case {
        Accept = "Accept",
        AcceptEncoding = "Accept-Encoding",
        Allow = "Allow",
        CacheControl = "Cache-Control",
        Connection = "Connection",
        ContentEncoding = "Content-Encoding",
        ContentLength = "Content-Length",
        ContentType = "Content-Type",
        Date = "Date",
        Host = "Host",
        IfModifiedSince = "If-Modified-Since",
        LastModified = "Last-Modified",
        Location = "Location",
        Range = "Range",
        Referer = "Referer",
        Server = "Server",
        UserAgent = "User-Agent",
        Vary = "Vary",
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::http::component::Error;

    use super::*;

    #[test]
    fn test_parse_ignores_case() {
        let test_cases = vec![
            ("content-type", Header::ContentType),
            ("CONTENT-ENCODING", Header::ContentEncoding),
            ("Last-Modified", Header::LastModified),
        ];
        for (value, expected) in test_cases {
            assert_eq!(value.parse::<Header>(), Ok(expected));
        }
    }

    #[test]
    fn test_parse_unknown() {
        let res = "X-Custom".parse::<Header>();
        assert_eq!(res, Err(Error::Header(String::from("X-Custom"))));
    }

    #[test]
    fn test_names_round_trip() {
        for header in Header::ALL {
            assert_eq!(header.name().parse::<Header>(), Ok(*header));
        }
    }
}
