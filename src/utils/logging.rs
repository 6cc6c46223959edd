//! 日志工具模块
//!
//! 初始化 tracing 订阅器，默认 info 级别，可用 RUST_LOG 覆盖

use tracing_subscriber::EnvFilter;

/// 初始化日志（重复调用时静默忽略，方便测试）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
