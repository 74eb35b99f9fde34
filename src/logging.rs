//! Diagnostic logging.
//!
//! Compact timestamped logs on stderr with per-module levels. Stdout is
//! reserved for graph output.
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "warn"
//!
//! [logging.modules]
//! "pygrapher::convert" = "info"     # conversion summaries
//! "pygrapher::resolve" = "trace"    # every resolved path
//! ```
//!
//! `RUST_LOG` takes precedence over config:
//! ```bash
//! RUST_LOG=pygrapher=debug pygrapher convert graph.json
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Filter directives for a logging config: the default level followed by
/// `module=level` overrides, sorted by module for stable output.
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();

    let mut directives = config.default.clone();
    for (module, level) in modules {
        directives.push_str(&format!(",{module}={level}"));
    }
    directives
}

/// Initialize logging with configuration.
///
/// Only the first call takes effect. `RUST_LOG` wins over `config`.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}

/// Log a command event at info level.
///
/// ```ignore
/// log_event!("convert", "wrote", "{}", path.display());
/// ```
#[macro_export]
macro_rules! log_event {
    ($command:expr, $event:expr) => {
        tracing::info!("[{}] {}", $command, $event)
    };
    ($command:expr, $event:expr, $($arg:tt)*) => {
        tracing::info!("[{}] {}: {}", $command, $event, format!($($arg)*))
    };
}
