use env_logger::Env;

const DEFAULT_FILTER: &str = "warn,geonote=info";

/// Honours `RUST_LOG`; defaults to info for our crates.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp(None)
        .try_init();
}
