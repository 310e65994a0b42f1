use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_http_addr")]
    pub http_addr: String,
    #[serde(default = "default_mock_latency_ms")]
    pub mock_latency_ms: u64,
    /// Every Nth data source call is rejected; 0 disables the simulation.
    #[serde(default)]
    pub mock_fail_every: u64,
    #[serde(default = "default_notifications_page_size")]
    pub notifications_page_size: usize,
    #[serde(default)]
    pub telemetry_enabled: bool,
    #[serde(default = "default_telemetry_service_name")]
    pub telemetry_service_name: String,
    #[serde(default = "default_telemetry_service_version")]
    pub telemetry_service_version: String,
    #[serde(default = "default_telemetry_environment")]
    pub telemetry_environment: String,
    #[serde(default = "default_telemetry_otlp_endpoint")]
    pub telemetry_otlp_endpoint: String,
}

fn default_http_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_mock_latency_ms() -> u64 {
    10
}

fn default_notifications_page_size() -> usize {
    10
}

fn default_telemetry_service_name() -> String {
    "parent-dashboard".to_string()
}

fn default_telemetry_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_telemetry_environment() -> String {
    "development".to_string()
}

fn default_telemetry_otlp_endpoint() -> String {
    "http://localhost:4317".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            mock_latency_ms: default_mock_latency_ms(),
            mock_fail_every: 0,
            notifications_page_size: default_notifications_page_size(),
            telemetry_enabled: false,
            telemetry_service_name: default_telemetry_service_name(),
            telemetry_service_version: default_telemetry_service_version(),
            telemetry_environment: default_telemetry_environment(),
            telemetry_otlp_endpoint: default_telemetry_otlp_endpoint(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::default())
    }

    fn from_source(source: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}
