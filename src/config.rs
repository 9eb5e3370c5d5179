//! Application Configuration
//!
//! Resolved once at startup from compile-time environment variables.

use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL every resource path is joined onto
    pub api_base: String,
    /// Rows per page for dashboard tables and the catalog
    pub page_size: usize,
    /// Delay before a search keystroke triggers a server fetch
    pub search_debounce_ms: u32,
    /// How long a toast stays visible
    pub toast_ms: u32,
}

impl AppConfig {
    pub fn from_values(api_base: Option<&str>, page_size: Option<&str>) -> Self {
        let api_base = api_base
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let page_size = page_size
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| (1..=MAX_PAGE_SIZE).contains(n))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            api_base,
            page_size,
            search_debounce_ms: 300,
            toast_ms: 4000,
        }
    }

    pub fn from_env() -> Self {
        Self::from_values(option_env!("FITHUB_API_BASE"), option_env!("FITHUB_PAGE_SIZE"))
    }

    /// Join a resource path onto the API base
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn test_trailing_slash_and_endpoint_join() {
        let config = AppConfig::from_values(Some("https://api.example.com/v1/"), None);
        assert_eq!(config.endpoint("/courses/4"), "https://api.example.com/v1/courses/4");
        assert_eq!(config.endpoint("orders"), "https://api.example.com/v1/orders");
    }

    #[test]
    fn test_invalid_page_size_falls_back() {
        assert_eq!(AppConfig::from_values(None, Some("0")).page_size, 10);
        assert_eq!(AppConfig::from_values(None, Some("abc")).page_size, 10);
        assert_eq!(AppConfig::from_values(None, Some("500")).page_size, 10);
        assert_eq!(AppConfig::from_values(None, Some(" 25 ")).page_size, 25);
    }
}
