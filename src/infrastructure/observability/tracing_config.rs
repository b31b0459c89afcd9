/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    /// Fallback filter directive used when `RUST_LOG` is not set.
    pub default_level: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, default_level: &str) -> Self {
        Self {
            environment: environment.into(),
            json_format,
            default_level: default_level.to_string(),
        }
    }

    pub fn filter_directive(&self) -> String {
        format!(
            "{},carecompanion=debug,tower_http=debug",
            self.default_level
        )
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            default_level: "info".to_string(),
        }
    }
}
