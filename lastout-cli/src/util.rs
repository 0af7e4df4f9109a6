use tracing_subscriber::EnvFilter;

/// Env var read before RUST_LOG.
pub const LOG_ENV: &str = "LASTOUT_LOG";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Logs go to stderr only: stdout carries nothing but the extracted output.
///
/// Precedence: `flag`, LASTOUT_LOG, RUST_LOG, `configured`, then "warn".
pub fn init_tracing(flag: Option<&str>, configured: Option<&str>) {
    let filter = flag
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_env(LOG_ENV).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| configured.and_then(|c| EnvFilter::try_new(c).ok()))
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();
}

pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("<non-string panic payload>");

        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "<unknown>".to_string());

        tracing::error!(%location, %payload, "panic");
        eprintln!("lastout: panic at {location}: {payload}");
    }));
}
