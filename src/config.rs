use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub app_base_url: String,
    /// JSON file replacing the built-in announcement catalog.
    pub announcements_path: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT: {e}"))?,
            app_base_url: env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "http://localhost".into()),
            announcements_path: env::var("ANNOUNCEMENTS_PATH").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Origins allowed by CORS: the base URL itself, its subdomains, and local development hosts.
    pub fn is_allowed_origin(&self, origin: &str) -> bool {
        if origin.starts_with("http://localhost") || origin.starts_with("http://127.0.0.1") {
            return true;
        }
        if origin == self.app_base_url {
            return true;
        }
        if let Some(idx) = self.app_base_url.find("://") {
            let after_scheme = &self.app_base_url[idx + 3..];
            let domain = after_scheme.split('/').next().unwrap_or(after_scheme);
            let domain_clean = domain.split(':').next().unwrap_or(domain);
            if origin.ends_with(&format!(".{domain_clean}")) {
                return true;
            }
        }
        false
    }
}
