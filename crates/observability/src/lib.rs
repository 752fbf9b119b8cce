//! Tracing and logging (shared setup).

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, ObservabilityConfig, ParseLogFormatError};

/// Initialize process-wide observability with defaults (JSON, `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&ObservabilityConfig::default());
}

/// Initialize process-wide observability from explicit settings.
pub fn init_with(config: &ObservabilityConfig) {
    tracing::init(config);
}
