use flexi_logger::{Logger, LoggerHandle};

/// Level spec used when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "info";

/// Start a stderr logger. `RUST_LOG` overrides `base_level`.
/// Keep the returned handle alive for as long as logging is needed.
pub fn setup_logging(base_level: &str) -> LoggerHandle {
    Logger::try_with_env_or_str(base_level)
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e))
        .log_to_stderr()
        .start()
        .unwrap_or_else(|e| panic!("Logger initialization failed with {}", e))
}
