//! Application configuration. API location, credentials, paths.

use serde::Deserialize;

/// API root used when nothing is configured (local backend, versioned prefix).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Page size for session listings. Matches the server's own default.
pub const DEFAULT_SESSION_PAGE_SIZE: u32 = 50;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// API root, e.g. "https://school.example.com/api/v1". Read from CLASSROOM_BASE_URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token. Read from CLASSROOM_TOKEN; prompted for when unset.
    #[serde(default)]
    pub token: Option<String>,

    /// Where grade exports are written (default "./exports"). Read from CLASSROOM_EXPORT_DIR.
    #[serde(default)]
    pub export_dir: Option<String>,

    /// Sessions fetched per page in the session browser. Read from CLASSROOM_SESSION_PAGE_SIZE.
    #[serde(default)]
    pub session_page_size: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("CLASSROOM_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the file.
        c = c.add_source(config::Environment::with_prefix("CLASSROOM"));
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // WEBUI_API_BASE_URL is what the web front-end uses; accept it as a fallback.
        if cfg.base_url.is_none() {
            cfg.base_url = std::env::var("WEBUI_API_BASE_URL").ok();
        }
        Ok(cfg)
    }

    /// Returns the API root. Defaults to DEFAULT_BASE_URL.
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Returns the configured token, ignoring blank values.
    pub fn token(&self) -> Option<String> {
        self.token.clone().filter(|t| !t.trim().is_empty())
    }

    /// Returns the export directory. Defaults to "./exports".
    pub fn export_dir_or_default(&self) -> String {
        self.export_dir
            .clone()
            .unwrap_or_else(|| "./exports".to_string())
    }

    /// Returns the session page size. Zero or unset falls back to the default.
    pub fn session_page_size_or_default(&self) -> u32 {
        self.session_page_size
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_SESSION_PAGE_SIZE)
    }
}
