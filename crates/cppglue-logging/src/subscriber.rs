//! Global subscriber installation.

use crate::level::LogLevel;
use crate::reload::{ReloadHandle, level_filter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload};

/// Install a stderr `fmt` subscriber filtered at `level`.
///
/// The filter sits behind a reload layer registered with
/// [`ReloadHandle::global`]. Returns `false` when a global subscriber was
/// already set; the reload handle is left untouched in that case.
pub fn init_logging(level: LogLevel) -> bool {
    let (filter, handle) = reload::Layer::new(level_filter(level));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }

    ReloadHandle::global().set_handle(handle);
    true
}
