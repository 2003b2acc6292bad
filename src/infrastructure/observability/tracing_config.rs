pub const DEFAULT_LOG_FILTER: &str = "info,pulmoscan=debug,tower_http=debug";

#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, format: &str, filter: Option<String>) -> Self {
        Self {
            environment: environment.into(),
            json_format: format.eq_ignore_ascii_case("json"),
            default_filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
