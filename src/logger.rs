use tracing_subscriber::EnvFilter;

/// 전역 로거 초기화 (`RUST_LOG` 로 레벨 조정, 기본 info)
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
