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

//! HTTP components.

// ----------------------------------------------------------------------------
// Macros
// ----------------------------------------------------------------------------

/// Defines a protocol token enum, i.e., an enum whose variants are spelled
/// out on the wire, like methods and header names.
///
/// Each variant is mapped to its canonical spelling. Parsing compares tokens
/// with the given function, i.e., `exact` or `ignore_case`, and reports
/// unknown tokens with the given error variant.
macro_rules! tokens {
    (
        $(#[$meta:meta])*
        pub enum $ty:ident / $err:ident, $cmp:ident {
            $(
                $(#[$comment:meta])*
                $name:ident = $token:literal
            ),+
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $ty {
            $(
                $(#[$comment])*
                $name,
            )+
        }

        impl $ty {
            /// All variants, in order of declaration.
            pub const ALL: &[$ty] = &[$($ty::$name),+];

            /// Returns the canonical spelling.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $($ty::$name => $token,)+
                }
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::http::component::Error;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|item| {
                        $crate::http::component::$cmp(item.name(), value)
                    })
                    .ok_or_else(|| {
                        $crate::http::component::Error::$err(
                            value.to_string(),
                        )
                    })
            }
        }

        impl AsRef<str> for $ty {
            #[inline]
            fn as_ref(&self) -> &str {
                self.name()
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Compares a token with its canonical spelling.
#[inline]
fn exact(name: &str, value: &str) -> bool {
    name == value
}

/// Compares a token with its canonical spelling, ignoring ASCII case.
#[inline]
fn ignore_case(name: &str, value: &str) -> bool {
    name.eq_ignore_ascii_case(value)
}

// ----------------------------------------------------------------------------
// Modules
// ----------------------------------------------------------------------------

mod error;
mod header;
mod method;
mod status;

pub use error::{Error, Result};
pub use header::Header;
pub use method::Method;
pub use status::Status;
