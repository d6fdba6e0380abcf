//! Configuration loaded from reframe.toml and environment variables.

use serde::{Deserialize, Serialize};

/// Main configuration structure loaded from reframe.toml and environment variables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub generation: GenerationConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Inbound HTTP server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind: String,
}

/// Outbound generation-service settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub backend_url: String,
    pub timeout_ms: u64,
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub http_bind: std::net::SocketAddr,
    pub log_level: String,
    pub session_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            timeout_ms: 20_000,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            http_bind: "127.0.0.1:3000"
                .parse()
                .expect("default bind address should parse"),
            log_level: "reframe=info".to_string(),
            session_timeout_ms: 10_000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generation: GenerationConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables.
    /// Uses REFRAME_CONFIG environment variable or defaults to "reframe.toml".
    pub fn load() -> anyhow::Result<Self> {
        // Env file resolution: REFRAME_ENV_FILE if set, else ./.env
        if let Ok(env_path) = std::env::var("REFRAME_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let config_path =
            std::env::var("REFRAME_CONFIG").unwrap_or_else(|_| "reframe.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            toml::from_str(&content)?
        } else {
            tracing::warn!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        // Env overrides (env-first)
        if let Ok(url) = std::env::var("REFRAME_BACKEND_URL") {
            config.generation.backend_url = url;
        }
        if let Ok(bind) = std::env::var("REFRAME_HTTP_BIND") {
            config.server.bind = bind;
        }
        if let Some(timeout) = std::env::var("REFRAME_GENERATE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.generation.timeout_ms = timeout;
        }

        config.runtime = RuntimeConfig::default();
        if let Ok(level) = std::env::var("REFRAME_LOG") {
            config.runtime.log_level = level;
        }
        if let Some(timeout) = std::env::var("REFRAME_SESSION_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.runtime.session_timeout_ms = timeout;
        }
        config.runtime.http_bind = config.server.bind.parse().map_err(|e| {
            anyhow::anyhow!("Invalid bind address '{}': {}", config.server.bind, e)
        })?;

        // Validate backend URL format (basic checks)
        if !config.generation.backend_url.starts_with("http://")
            && !config.generation.backend_url.starts_with("https://")
        {
            tracing::warn!(
                "Backend URL '{}' doesn't start with http:// or https://",
                config.generation.backend_url
            );
        }

        // Clamp timeout to something workable
        if config.generation.timeout_ms < 1_000 {
            tracing::warn!(
                "generation timeout {}ms is too low, clamping to 1000ms",
                config.generation.timeout_ms
            );
            config.generation.timeout_ms = 1_000;
        }

        Ok(config)
    }

    pub fn generation_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.generation.timeout_ms)
    }

    pub fn session_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.runtime.session_timeout_ms)
    }
}
