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

//! Static file server.

use anyhow::Context;
use hearth::{Dispatcher, ServerConfig, ShutdownController};
use hearth_serve::server::Server;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ----------------------------------------------------------------------------
// Program
// ----------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    let config = ServerConfig::discover()
        .context("failed to load configuration")?
        .canonicalize()?;

    // Initialize logging, preferring RUST_LOG over the configured filter
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log)
            .with_context(|| format!("invalid log filter: {}", config.log))?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Bind server to the configured address
    let config = Arc::new(config);
    let mut server = Server::builder(Dispatcher::new(Arc::clone(&config)))
        .bind(config.addr.as_str())
        .and_then(|builder| builder.idle_timeout(config.idle_timeout).listen())
        .with_context(|| format!("failed to listen on {}", config.addr))?;
    for addr in server.local_addrs()? {
        info!("Listening requests on http://{addr}");
    }
    info!("Serving files from {}", config.root.display());

    // Stop gracefully on interrupt, and run until then
    let _controller = ShutdownController::install(server.stopper())
        .context("failed to install signal handler")?;
    server.run()?;
    Ok(())
}
