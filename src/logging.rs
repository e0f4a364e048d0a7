//! 日志初始化
//!
//! 输出到 stderr，过滤规则取自 `RUST_LOG`，默认只显示警告。

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    // 重复初始化时保留已有的 subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}
