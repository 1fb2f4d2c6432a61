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

//! Content classifier.

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Content type of files with unknown or no extension.
pub const DEFAULT_TYPE: &str = "application/stream";

/// Content types by lower-cased extension.
static TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("c", "text/plain"),
    ("h", "text/plain"),
    ("html", "text/html"),
    ("htm", "text/htm"),
    ("css", "text/css"),
    ("gif", "image/gif"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("pdf", "application/pdf"),
    ("ps", "application/postscript"),
];

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns the content type for the given path.
///
/// The extension is everything after the last `.`, unless it's followed by a
/// `/`, in which case the dot belongs to a directory name. Matching ignores
/// ASCII case, so `INDEX.HTML` is served as HTML.
///
/// # Examples
///
/// ```
/// use hearth::mime::content_type;
///
/// // Obtain content types
/// assert_eq!(content_type("/srv/a.TXT"), "text/plain");
/// assert_eq!(content_type("/srv/v1.0/README"), "application/stream");
/// ```
#[must_use]
pub fn content_type(path: &str) -> &'static str {
    let Some((_, ext)) = path.rsplit_once('.') else {
        return DEFAULT_TYPE;
    };
    if ext.contains('/') {
        return DEFAULT_TYPE;
    }

    // Look up extension, falling back to the default
    TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map_or(DEFAULT_TYPE, |&(_, mime)| mime)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        let test_cases = vec![
            ("/srv/a.txt", "text/plain"),
            ("/srv/main.c", "text/plain"),
            ("/srv/lib.H", "text/plain"),
            ("/srv/index.html", "text/html"),
            ("/srv/INDEX.HTM", "text/htm"),
            ("/srv/style.Css", "text/css"),
            ("/srv/a.gif", "image/gif"),
            ("/srv/a.jpg", "image/jpeg"),
            ("/srv/a.JPEG", "image/jpeg"),
            ("/srv/a.png", "image/png"),
            ("/srv/a.pdf", "application/pdf"),
            ("/srv/a.ps", "application/postscript"),
        ];
        for (path, expected) in test_cases {
            assert_eq!(content_type(path), expected, "Failed for: {path}");
        }
    }

    #[test]
    fn test_content_type_default() {
        for path in ["/srv/a.bin", "/srv/README", "/srv/v1.0/README", "a."] {
            assert_eq!(content_type(path), DEFAULT_TYPE, "Failed for: {path}");
        }
    }

    #[test]
    fn test_content_type_uses_last_dot() {
        assert_eq!(content_type("/srv/archive.tar.txt"), "text/plain");
        assert_eq!(content_type("/srv/notes.txt.bak"), DEFAULT_TYPE);
    }
}
