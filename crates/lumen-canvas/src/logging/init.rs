use std::sync::OnceLock;

use env_logger::{Builder, WriteStyle};
use log::LevelFilter;

/// How the canvas's `log` records are printed when this crate installs the
/// backend.
///
/// Hosts that already run their own logger never need this; the canvas only
/// talks to the `log` facade.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directives, e.g. `"lumen_canvas=trace"`. Falls back to
    /// `RUST_LOG`.
    pub filter: Option<String>,

    /// Level for everything no directive names.
    pub default_level: LevelFilter,

    pub style: WriteStyle,

    /// Print through the test harness so output is captured per test.
    pub capture: bool,
}

impl LoggingConfig {
    /// An application embedding the canvas: info and up, colored when the
    /// terminal allows it.
    pub fn host() -> Self {
        Self {
            filter: None,
            default_level: LevelFilter::Info,
            style: WriteStyle::Auto,
            capture: false,
        }
    }

    /// Unit tests: every canvas record, warnings from elsewhere, captured.
    pub fn tests() -> Self {
        Self {
            filter: Some("lumen_canvas=trace".to_owned()),
            default_level: LevelFilter::Warn,
            style: WriteStyle::Never,
            capture: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::host()
    }
}

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Installs `env_logger` as the process-wide `log` backend.
///
/// Only the first call has an effect. Returns whether this crate's logger is
/// the one in place; `false` means a logger set by the host was kept.
pub fn init_logging(config: &LoggingConfig) -> bool {
    *INSTALLED.get_or_init(|| install(config))
}

fn install(config: &LoggingConfig) -> bool {
    let mut builder = Builder::new();
    builder.filter_level(config.default_level);

    let directives = config.filter.clone().or_else(|| std::env::var("RUST_LOG").ok());
    if let Some(directives) = directives {
        builder.parse_filters(&directives);
    }

    builder.write_style(config.style).is_test(config.capture);
    if config.capture {
        builder.format_timestamp(None);
    }

    match builder.try_init() {
        Ok(()) => {
            log::debug!("env_logger installed ({:?})", config.default_level);
            true
        }
        Err(err) => {
            log::debug!("keeping existing logger: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_decides() {
        let first = init_logging(&LoggingConfig::tests());
        let second = init_logging(&LoggingConfig::host());
        assert_eq!(first, second);
        assert_eq!(INSTALLED.get(), Some(&first));
    }

    #[test]
    fn presets_differ_in_capture() {
        assert!(LoggingConfig::tests().capture);
        assert!(!LoggingConfig::default().capture);
        assert_eq!(LoggingConfig::default().default_level, LevelFilter::Info);
    }
}
