use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub page_size: u32,
    pub search_debounce: Duration,
    pub http_timeout: Duration,
    pub require_auth: bool,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        let api_base_url = env_string("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let page_size = env_u64("PAGE_SIZE")
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let search_debounce =
            Duration::from_millis(env_u64("SEARCH_DEBOUNCE_MS").unwrap_or(DEFAULT_DEBOUNCE_MS));

        let http_timeout =
            Duration::from_millis(env_u64("HTTP_TIMEOUT_MS").unwrap_or(DEFAULT_TIMEOUT_MS));

        let require_auth = std::env::var("REQUIRE_AUTH")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            api_base_url,
            page_size,
            search_debounce,
            http_timeout,
            require_auth,
            log_level,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            http_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            require_auth: false,
            log_level: "info".to_string(),
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str) -> Option<u64> {
    env_string(key)?.parse().ok()
}
