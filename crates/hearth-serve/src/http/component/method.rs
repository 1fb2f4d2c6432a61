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

//! HTTP method.

tokens! {
    /// HTTP method.
    ///
    /// Methods are case-sensitive tokens, so `get` is not the same method as
    /// `GET`, and is rejected like any other unknown method.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use hearth_serve::http::Method;
    ///
    /// // Create method from string
    /// let method: Method = "HEAD".parse()?;
    /// assert_eq!(method, Method::Head);
    /// assert_eq!(method.to_string(), "HEAD");
    /// # Ok(())
    /// # }
    /// ```
    pub enum Method / Method, exact {
        Get = "GET",
        Head = "HEAD",
        Post = "POST",
        Put = "PUT",
        Delete = "DELETE",
        Options = "OPTIONS",
        Trace = "TRACE",
        Patch = "PATCH",
        Connect = "CONNECT",
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
    fn test_parse() {
        assert_eq!("HEAD".parse::<Method>(), Ok(Method::Head));
        assert_eq!("DELETE".parse::<Method>(), Ok(Method::Delete));
        assert_eq!(
            "BREW".parse::<Method>(),
            Err(Error::Method(String::from("BREW")))
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        for value in ["get", "Head", "pOST"] {
            assert_eq!(
                value.parse::<Method>(),
                Err(Error::Method(String::from(value))),
                "Failed for: {value}"
            );
        }
    }
}
