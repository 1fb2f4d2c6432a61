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

//! Directory renderer.

use minijinja::{Environment, context};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::error::{Error, Result};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Name of the listing template, which enables HTML auto-escaping.
const NAME: &str = "listing.html";

/// Listing template.
const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ path }}</title>
<link rel="shortcut icon" href="/favicon.png">
<link rel="stylesheet" href="{{ cdn|safe }}/css/bootstrap.min.css">
<script src="{{ cdn|safe }}/js/bootstrap.bundle.min.js"></script>
<base href="{{ base }}">
</head>
<body id="top">
<nav class="navbar navbar-expand-lg navbar-dark sticky-top">
<div class="container">
</div>
</nav>
<main>
<div class="container p-3">
<h2>{{ path }}</h2>
<ul class="list-unstyled my-3">
{%- for name in entries %}
<li><a href="{{ name }}">{{ name }}</a></li>
{%- endfor %}
</ul>
</div>
</main>
<footer class="p-3">
<div class="container">
</div>
</footer>
</body>
</html>
"#;

/// Location of the stylesheet and scripts.
const CDN: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.1.3/dist";

/// Template environment, compiling the template on first use.
static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    env.set_loader(|name| Ok((name == NAME).then(|| TEMPLATE.to_string())));
    env
});

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Renders an HTML listing of the given directory.
///
/// Entries are sorted by name. The parent directory `..` comes first, unless
/// the raw request path is `/`, as there's nothing above the document root.
/// Links are relative to the raw request path, which is used as the base of
/// the document, while the decoded path serves as title and heading.
///
/// # Errors
///
/// This function returns [`Error::NotFound`] if the directory could not be
/// enumerated, and [`Error::Template`] if rendering failed.
pub fn render(dir: &Path, raw: &str, decoded: &str) -> Result<String> {
    let not_found = |_| Error::NotFound(dir.to_path_buf());
    let mut entries = fs::read_dir(dir)
        .map_err(not_found)?
        .map(|entry| {
            entry.map(|entry| entry.file_name().to_string_lossy().into_owned())
        })
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(not_found)?;

    // Sort entries, and prepend the parent directory below the root
    entries.sort_unstable();
    if raw != "/" {
        entries.insert(0, String::from(".."));
    }

    // Links must resolve relative to the directory, not its parent
    let base = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    // Render template
    let template = ENV.get_template(NAME)?;
    template
        .render(context! {
            path => decoded,
            base => base,
            cdn => CDN,
            entries => entries,
        })
        .map_err(Into::into)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// Creates a directory with the given files.
    fn fixture(names: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        for name in names {
            fs::write(dir.path().join(name), "").expect("writes");
        }
        dir
    }

    #[test]
    fn test_render_sorted_with_parent() {
        let dir = fixture(&["b.html", "a.html"]);
        let html = render(dir.path(), "/docs", "/docs").expect("renders");
        let parent = html.find(r#"<a href="..">"#).expect("parent");
        let a = html.find(r#"<a href="a.html">a.html</a>"#).expect("a");
        let b = html.find(r#"<a href="b.html">b.html</a>"#).expect("b");
        assert!(parent < a && a < b);
        assert!(!html.contains(r#"<a href=".">"#));
    }

    #[test]
    fn test_render_root_without_parent() {
        let dir = fixture(&["a.txt"]);
        let html = render(dir.path(), "/", "/").expect("renders");
        assert!(!html.contains(r#"<a href="..">"#));
        assert!(html.contains(r#"<a href="a.txt">a.txt</a>"#));
    }

    #[test]
    fn test_render_base_and_title() {
        let dir = fixture(&[]);
        let html =
            render(dir.path(), "/my%20docs", "/my docs").expect("renders");
        assert!(html.contains("<title>&#x2f;my docs</title>"));
        assert!(html.contains("<h2>&#x2f;my docs</h2>"));
        assert!(html.contains(r#"<base href="&#x2f;my%20docs&#x2f;">"#));
    }

    #[test]
    fn test_render_escapes_names() {
        let dir = fixture(&["<b>&.txt"]);
        let html = render(dir.path(), "/x/", "/x/").expect("renders");
        assert!(html.contains("&lt;b&gt;&amp;.txt"));
        assert!(!html.contains("<b>&.txt"));
    }

    #[test]
    fn test_render_missing_directory() {
        let dir = fixture(&[]);
        let res = render(&dir.path().join("missing"), "/missing", "/missing");
        assert!(matches!(res, Err(Error::NotFound(_))));
    }
}
