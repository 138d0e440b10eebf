use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 7070, worker_threads: Some(4) }
    }
}

/// Same-site policy for the token cookie. Unset means the attribute is omitted.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for session tokens. Usually supplied via `ACCESS_TOKEN_SECRET`.
    #[serde(default)]
    pub token_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default)]
    pub cookie_same_site: Option<SameSitePolicy>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_secs: default_token_ttl(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            cookie_same_site: None,
        }
    }
}

fn default_token_ttl() -> u64 { 60 * 60 }
fn default_cookie_name() -> String { "token".into() }

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { backend: StorageBackend::File, data_dir: default_data_dir() }
    }
}

fn default_data_dir() -> String { "data".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allowed_origins: default_allowed_origins() }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".into(),
        "https://the-career-maker.netlify.app".into(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `compact` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_log_format() -> String { "compact".into() }

/// Load from `CONFIG_PATH` (default `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

pub fn from_toml_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay environment variables onto the file configuration.
    /// The lookup is injected so tests do not have to mutate the process env.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(secret) = lookup("ACCESS_TOKEN_SECRET") {
            self.auth.token_secret = secret;
        }
        if let Some(dir) = lookup("DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.log.format = format;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.auth.validate()?;
        self.storage.normalize();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.token_secret.trim().is_empty() {
            return Err(anyhow!("auth.token_secret is empty; set it in config.toml or ACCESS_TOKEN_SECRET"));
        }
        if self.token_ttl_secs == 0 {
            return Err(anyhow!("auth.token_ttl_secs must be a positive number of seconds"));
        }
        if self.cookie_name.trim().is_empty() {
            return Err(anyhow!("auth.cookie_name must not be empty"));
        }
        Ok(())
    }
}

impl StorageConfig {
    fn normalize(&mut self) {
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_cover_local_development() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 7070);
        assert_eq!(cfg.auth.token_ttl_secs, 3600);
        assert_eq!(cfg.auth.cookie_name, "token");
        assert!(!cfg.auth.cookie_secure);
        assert!(cfg.auth.cookie_same_site.is_none());
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert_eq!(cfg.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn parses_partial_toml() -> Result<()> {
        let cfg = from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9000

            [auth]
            token_secret = "s3cret"
            cookie_same_site = "lax"

            [storage]
            backend = "memory"
            "#,
        )?;
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.auth.token_secret, "s3cret");
        assert_eq!(cfg.auth.token_ttl_secs, 3600);
        assert_eq!(cfg.auth.cookie_same_site, Some(SameSitePolicy::Lax));
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.storage.data_dir, "data");
        Ok(())
    }

    #[test]
    fn env_overrides_file_values() {
        let env = env_of(&[
            ("PORT", "8088"),
            ("ACCESS_TOKEN_SECRET", "from-env"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ]);
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).cloned());
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.auth.token_secret, "from-env");
        assert_eq!(cfg.cors.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn unparsable_port_is_ignored() {
        let env = env_of(&[("PORT", "not-a-port")]);
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).cloned());
        assert_eq!(cfg.server.port, 7070);
    }

    #[test]
    fn validation_requires_secret() {
        let mut cfg = AppConfig::default();
        assert!(cfg.normalize_and_validate().is_err());
        cfg.auth.token_secret = "x".into();
        assert!(cfg.normalize_and_validate().is_ok());
    }

    #[test]
    fn validation_rejects_zero_ttl_and_port() {
        let mut cfg = AppConfig::default();
        cfg.auth.token_secret = "x".into();
        cfg.auth.token_ttl_secs = 0;
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.auth.token_secret = "x".into();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn normalize_fills_blank_host_and_threads() -> Result<()> {
        let mut cfg = AppConfig::default();
        cfg.auth.token_secret = "x".into();
        cfg.server.host = "  ".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate()?;
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
        Ok(())
    }
}
