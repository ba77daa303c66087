//! Tracing subscriber setup

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `warn`. Output goes to
/// `log_file` when given, otherwise to stderr.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;

            builder.with_writer(Arc::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
