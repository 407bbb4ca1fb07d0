use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_api_url: String,
    pub catalog_timeout: Duration,
    pub store_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let catalog_api_url = env::var("CATALOG_API_URL")?;
        let catalog_timeout = env::var("CATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));
        let store_path = env::var("STORE_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        Ok(Self {
            catalog_api_url,
            catalog_timeout,
            store_path,
            host,
            port,
        })
    }
}
