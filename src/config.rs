use anyhow::{bail, Context};
use serde::Deserialize;

/// Environment variable naming a YAML config file.
pub const CONFIG_ENV: &str = "CACHET_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub resource: ResourceConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Sent in the `Server` header
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// The only request target that is served
    pub path: String,
    /// How often the resource's last-modified stamp moves forward
    pub update_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            name: concat!("cachet/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            path: "/TestServer".to_string(),
            update_interval_secs: 60,
        }
    }
}

impl Config {
    /// Loads the file named by `CACHET_CONFIG` (or the defaults), then applies
    /// the `LISTEN` and `UPDATE_INTERVAL_SECS` overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {path}"))?;
                Self::from_yaml(&text).with_context(|| format!("loading config file {path}"))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }

        if let Ok(secs) = std::env::var("UPDATE_INTERVAL_SECS") {
            cfg.resource.update_interval_secs = secs
                .parse()
                .with_context(|| format!("UPDATE_INTERVAL_SECS is not a number: {secs}"))?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(text).context("invalid YAML config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.resource.update_interval_secs == 0 {
            bail!("resource.update_interval_secs must be greater than zero");
        }
        if !self.resource.path.starts_with('/') {
            bail!("resource.path must start with '/': {}", self.resource.path);
        }
        Ok(())
    }
}
