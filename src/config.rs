use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "SWITCHYARD_CONFIG";
/// Environment variable overriding the listen address as `host:port`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub workers: WorkerConfig,
    pub logging: LoggingConfig,
}

/// Where the event loop listens.
///
/// The same values populate `server_name`/`server_port` on every request, so
/// they must describe the address actually bound.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Upper bound on threads running application code
    pub threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of trace, debug, info, warn, error
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { threads: 16 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> anyhow::Result<tracing::Level> {
        self.level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log level {:?}", self.level))
    }
}

impl Config {
    /// Loads the YAML file named by `SWITCHYARD_CONFIG` (defaults when unset),
    /// then applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        match std::env::var(LISTEN_ENV) {
            Ok(listen) => cfg.with_listen(&listen),
            Err(_) => Ok(cfg),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Replaces host and port with a `host:port` string.
    pub fn with_listen(mut self, listen: &str) -> anyhow::Result<Self> {
        let (host, port) = listen
            .rsplit_once(':')
            .with_context(|| format!("listen address {:?} is not host:port", listen))?;
        self.server.host = host.to_string();
        self.server.port = port
            .parse()
            .with_context(|| format!("invalid port in listen address {:?}", listen))?;
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.workers.threads > 0, "workers.threads must be at least 1");
        self.logging.max_level()?;
        Ok(())
    }
}
