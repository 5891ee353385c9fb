//! 日志初始化
//!
//! 安装 `tracing-subscriber` fmt 订阅者，并通过 `tracing-log` 把 `log`
//! 记录转发到 `tracing`。过滤规则读取 `RUST_LOG`，未设置时使用
//! [`DEFAULT_FILTER`]。

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// 默认过滤规则（所有 `hotel_*` crate 的 info 级别）
pub const DEFAULT_FILTER: &str = "hotel=info";

/// 日志初始化错误
#[derive(Error, Debug)]
pub enum LoggingError {
    /// `log` 桥接已安装
    #[error("Failed to install log bridge: {0}")]
    LogBridge(#[from] log::SetLoggerError),

    /// 全局订阅者已安装
    #[error("Failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// 初始化日志（默认过滤规则）
///
/// 进程内只能成功调用一次，重复调用返回 `LoggingError`。
///
/// # 示例
///
/// ```rust,no_run
/// hotel_sdk::init_logging()?;
/// tracing::info!("controller ready");
/// # Ok::<(), hotel_sdk::LoggingError>(())
/// ```
pub fn init_logging() -> Result<(), LoggingError> {
    init_logging_with(DEFAULT_FILTER)
}

/// 初始化日志（指定默认过滤规则，`RUST_LOG` 优先）
pub fn init_logging_with(default_directives: &str) -> Result<(), LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(rust_log.as_deref(), default_directives);

    tracing_log::LogTracer::init()?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// `RUST_LOG` 非空且可解析时原样使用，否则使用默认规则
fn build_filter(rust_log: Option<&str>, default_directives: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_overrides_default() {
        let filter = build_filter(Some("hotel=debug"), DEFAULT_FILTER);
        assert_eq!(filter.to_string(), "hotel=debug");
    }

    #[test]
    fn test_missing_or_empty_rust_log_uses_default() {
        assert_eq!(build_filter(None, DEFAULT_FILTER).to_string(), "hotel=info");
        assert_eq!(build_filter(Some("  "), DEFAULT_FILTER).to_string(), "hotel=info");
    }

    #[test]
    fn test_init_logging_only_once() {
        init_logging().unwrap();
        tracing::debug!("logging initialised");
        log::info!("bridged through tracing-log");

        let second = init_logging();
        assert!(matches!(second, Err(LoggingError::LogBridge(_))));
    }
}
