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

//! Configuration.

use serde::{Deserialize, Deserializer};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod error;

pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "HEARTH_CONFIG";

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "hearth.toml";

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Server configuration.
///
/// The configuration is loaded once at startup and shared read-only between
/// all requests afterwards. All settings are optional, so an empty file (or
/// no file at all) yields a server for the working directory on port 8080.
///
/// ```toml
/// root = "public"
/// addr = "127.0.0.1:8000"
/// idle_timeout = 10
/// log = "hearth=debug"
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Document root.
    pub root: PathBuf,
    /// Address to listen on.
    pub addr: String,
    /// Duration after which idle connections are closed, given in seconds.
    #[serde(deserialize_with = "seconds")]
    pub idle_timeout: Duration,
    /// Log filter, used when `RUST_LOG` is not set.
    pub log: String,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl ServerConfig {
    /// Loads the configuration from the TOML file at the given path.
    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(Into::into)
    }

    /// Loads the configuration from the first location that applies.
    ///
    /// The file named by [`CONFIG_ENV`] takes precedence, which must exist if
    /// set. Otherwise, [`CONFIG_FILE`] in the working directory is loaded if
    /// present, falling back to the defaults.
    pub fn discover() -> Result<Self> {
        let var = env::var_os(CONFIG_ENV).map(PathBuf::from);
        match locate(var, Path::new(CONFIG_FILE)) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Canonicalizes the document root.
    ///
    /// The root must be resolved once at startup, since the resolver relies
    /// on it being absolute and free of symbolic links.
    pub fn canonicalize(mut self) -> Result<Self> {
        match self.root.canonicalize() {
            Ok(root) => {
                self.root = root;
                Ok(self)
            }
            Err(err) => Err(Error::Root { path: self.root, err }),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Default for ServerConfig {
    /// Creates the default configuration.
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            addr: String::from("0.0.0.0:8080"),
            idle_timeout: Duration::from_secs(30),
            log: String::from("info"),
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns the configuration file to load, if any.
fn locate(var: Option<PathBuf>, file: &Path) -> Option<PathBuf> {
    var.or_else(|| file.is_file().then(|| file.to_path_buf()))
}

/// Deserializes a duration given in seconds.
fn seconds<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("hearth.toml");
        fs::write(&path, "root = \"public\"\nidle_timeout = 5\n").expect("w");
        let config = ServerConfig::load(&path).expect("loads");
        assert_eq!(config.root, PathBuf::from("public"));
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
        assert_eq!(config.log, "info");
    }

    #[test]
    fn test_load_empty() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("hearth.toml");
        fs::write(&path, "").expect("writes");
        let config = ServerConfig::load(&path).expect("loads");
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_load_unknown_key() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("hearth.toml");
        fs::write(&path, "port = 8080\n").expect("writes");
        let res = ServerConfig::load(&path);
        assert!(matches!(res, Err(Error::Toml(_))));
    }

    #[test]
    fn test_load_missing() {
        let res = ServerConfig::load("/nonexistent/hearth.toml");
        assert!(matches!(res, Err(Error::Io(_))));
    }

    #[test]
    fn test_locate() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join(CONFIG_FILE);
        assert_eq!(locate(None, &file), None);
        fs::write(&file, "").expect("writes");
        assert_eq!(locate(None, &file), Some(file.clone()));
        let var = PathBuf::from("other.toml");
        assert_eq!(locate(Some(var.clone()), &file), Some(var));
    }

    #[test]
    fn test_canonicalize() {
        let dir = TempDir::new().expect("tempdir");
        let config = ServerConfig {
            root: dir.path().join("."),
            ..ServerConfig::default()
        };
        let config = config.canonicalize().expect("canonicalizes");
        let expected = dir.path().canonicalize().expect("canonicalizes");
        assert_eq!(config.root, expected);

        // Missing roots are rejected
        let config = ServerConfig {
            root: dir.path().join("missing"),
            ..ServerConfig::default()
        };
        let res = config.canonicalize();
        assert!(matches!(res, Err(Error::Root { .. })));
    }
}
