use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Optional separate listener for `/healthz` and `/metrics`.
    #[serde(default)]
    pub admin_addr: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), admin_addr: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
}

impl Default for StorageConfig {
    fn default() -> Self { Self { seed_sample_data: default_seed_sample_data() } }
}

fn default_seed_sample_data() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_dir")]
    pub dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self { Self { dir: default_frontend_dir() } }
}

fn default_frontend_dir() -> String { "frontend".into() }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Config built only from environment variables, used when no file is present.
    /// Reads `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`, `SEED_SAMPLE_DATA`,
    /// `FRONTEND_DIR` and `LOG_JSON`.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Some(seed) = env_flag("SEED_SAMPLE_DATA") {
            cfg.storage.seed_sample_data = seed;
        }
        if let Ok(dir) = std::env::var("FRONTEND_DIR") {
            cfg.frontend.dir = dir;
        }
        if let Some(json) = env_flag("LOG_JSON") {
            cfg.logging.json = json;
        }
        cfg
    }

    /// File config when readable and valid, otherwise the environment fallback.
    pub fn load_or_env() -> Self {
        Self::load_and_validate().unwrap_or_else(|_| {
            let mut cfg = Self::from_env();
            // env values are already typed; only host/threads need normalizing
            let _ = cfg.server.normalize();
            cfg
        })
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        if self.frontend.dir.trim().is_empty() {
            self.frontend.dir = default_frontend_dir();
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
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
        if let Some(addr) = &self.admin_addr {
            if addr.trim().is_empty() {
                self.admin_addr = None;
            }
        }
        Ok(())
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let v = std::env::var(name).ok()?;
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
