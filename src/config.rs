use std::env;

/// Selects whether service calls hit the simulated upstream or a real one.
/// Only the mock upstream ships with this build; see `gateway`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMode {
    Mock,
    Real,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_mode: ApiMode,
    pub upstream_base_url: String,
    /// Probability in [0, 1] that a simulated upstream call fails.
    pub payment_failure_rate: f64,
    /// Artificial latency applied to every simulated upstream call.
    pub upstream_delay_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let api_mode = match env::var("API_MODE").as_deref() {
            Ok("real") => ApiMode::Real,
            _ => ApiMode::Mock,
        };
        if api_mode == ApiMode::Real {
            anyhow::bail!("API_MODE=real is not available in this build; unset it or use mock");
        }

        let upstream_base_url =
            env::var("UPSTREAM_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string());

        let payment_failure_rate = env::var("PAYMENT_FAILURE_RATE")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);

        let upstream_delay_ms = env::var("UPSTREAM_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(150);

        Ok(Self {
            host,
            port,
            api_mode,
            upstream_base_url,
            payment_failure_rate,
            upstream_delay_ms,
        })
    }
}
