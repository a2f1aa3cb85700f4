use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` provides one.
///
/// wgpu's internals log adapter probing at info level; keep them quiet.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "debug",
/// "trianglebin=debug,wgpu=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Filter string that [`init_logging`] applies.
    pub fn resolved_filter(&self, rust_log: Option<&str>) -> String {
        self.env_filter
            .as_deref()
            .or(rust_log)
            .unwrap_or(DEFAULT_FILTER)
            .to_string()
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = config.resolved_filter(rust_log.as_deref());

        env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .init();

        log::debug!("logging initialized ({filter})");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_filter_wins_over_environment() {
        let config = LoggingConfig { env_filter: Some("debug".into()), ..Default::default() };
        assert_eq!(config.resolved_filter(Some("warn")), "debug");
    }

    #[test]
    fn environment_used_without_config_filter() {
        assert_eq!(LoggingConfig::default().resolved_filter(Some("trace")), "trace");
    }

    #[test]
    fn default_filter_quiets_wgpu() {
        let filter = LoggingConfig::default().resolved_filter(None);
        assert!(filter.starts_with("info"));
        assert!(filter.contains("wgpu_core=warn"));
    }
}
