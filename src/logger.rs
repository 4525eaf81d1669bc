//! 日志初始化
//!
//! `RUST_LOG` 优先；未设置时按 verbose 选择 debug 或 info

use tracing_subscriber::EnvFilter;

/// 初始化全局日志，可重复调用
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("golden_gen={},warn", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
