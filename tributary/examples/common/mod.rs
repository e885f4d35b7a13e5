use tributary::{EnvCredentials, Provider, TributaryError};

/// Set up `tracing` output, honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tributary=debug")),
        )
        .try_init();
}

/// FRED when `FRED_API_KEY` is set, the mock provider otherwise.
pub fn get_provider() -> Result<(Provider, EnvCredentials), TributaryError> {
    if std::env::var("FRED_API_KEY").is_ok() {
        Ok((tributary_fred::provider()?, EnvCredentials::new()))
    } else {
        println!("--- (FRED_API_KEY not set, using mock provider) ---");
        Ok((tributary_mock::provider()?, EnvCredentials::new()))
    }
}
