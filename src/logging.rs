// ==========================================
// 杯子钥匙扣运营看板 - 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 默认只放开本 crate 的 info 日志，依赖库（rusqlite 等）保持 warn
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时使用的过滤规则
pub const DEFAULT_FILTER: &str = "warn,cup_keychain_ops=info";

/// 测试环境的过滤规则
pub const TEST_FILTER: &str = "warn,cup_keychain_ops=debug";

/// 构造过滤器：优先 RUST_LOG，非法或缺失时回退到 `fallback`
fn build_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: warn,cup_keychain_ops=info）
///   例如: RUST_LOG=cup_keychain_ops::engine=debug
///
/// # 示例
/// ```no_run
/// use cup_keychain_ops::logging;
/// logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(build_filter(DEFAULT_FILTER))
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// 可重复调用；本 crate 输出 debug 级别
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(TEST_FILTER))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_parse() {
        for directives in [DEFAULT_FILTER, TEST_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{}", directives);
        }
    }

    #[test]
    fn test_init_test_is_repeatable() {
        init_test();
        init_test();
        tracing::debug!("测试日志已初始化");
    }
}
