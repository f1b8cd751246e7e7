use crate::agent::DEFAULT_SIMULATED_LATENCY;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Complete airwatch configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirwatchConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub fixtures: FixtureConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Simulated agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Artificial delay before each agent response (milliseconds)
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

fn default_simulated_latency_ms() -> u64 {
    DEFAULT_SIMULATED_LATENCY.as_millis() as u64
}

impl AgentConfig {
    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}

/// Fixture dataset configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureConfig {
    /// GeoJSON file to serve instead of the embedded dataset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AirwatchConfig {
    /// Apply `AIRWATCH_*` environment overrides. Unparseable values are ignored.
    pub fn apply_env(mut self) -> Self {
        if let Ok(v) = std::env::var("AIRWATCH_BIND_ADDR") {
            if !v.is_empty() {
                self.server.bind_addr = v;
            }
        }
        if let Ok(v) = std::env::var("AIRWATCH_LATENCY_MS") {
            if let Ok(ms) = v.parse::<u64>() {
                self.agent.simulated_latency_ms = ms;
            }
        }
        if let Ok(v) = std::env::var("AIRWATCH_FIXTURES") {
            if !v.is_empty() {
                self.fixtures.path = Some(PathBuf::from(v));
            }
        }
        self
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<AirwatchConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: AirwatchConfig = toml::from_str(&contents)?;
    Ok(config)
}
