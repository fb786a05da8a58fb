use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` names one.
///
/// wgpu's internals are chatty at `info`; cap them so resize and shader
/// diagnostics stay readable.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "beta_engine=trace,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    /// Prefix records with a timestamp.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Resolves the filter string: explicit config, then `RUST_LOG`, then
    /// [`DEFAULT_FILTER`].
    pub fn resolve_filter(&self, rust_log: Option<String>) -> String {
        self.env_filter
            .clone()
            .or(rust_log)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter(std::env::var("RUST_LOG").ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        if !config.timestamps {
            builder.format_timestamp(None);
        }

        // A test harness or embedding host may have installed a logger first.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized (filter: {filter})");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_env() {
        let cfg = LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_filter(Some("error".into())), "debug");
    }

    #[test]
    fn env_filter_used_when_config_is_silent() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.resolve_filter(Some("trace".into())), "trace");
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        let cfg = LoggingConfig::default();
        assert_eq!(cfg.resolve_filter(Some("  ".into())), DEFAULT_FILTER);
        assert_eq!(cfg.resolve_filter(None), DEFAULT_FILTER);
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig::default());
        init_logging(LoggingConfig {
            env_filter: Some("trace".into()),
            ..Default::default()
        });
        log::info!("still alive after double init");
    }
}
