use std::net::SocketAddr;
use std::path::Path;

use mod3d_gate::GateConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Allow cross-origin requests from any origin.
    pub cors_permissive: bool,
    /// Default log level when `RUST_LOG`-style overrides are absent.
    pub log_level: String,
    pub gate: GateConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cors_permissive: true,
            log_level: "info".into(),
            gate: GateConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert!(c.cors_permissive);
        assert_eq!(c.log_level, "info");
        assert!(!c.gate.enforce_ownership_on_edit);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let c = ServerConfig::from_toml_str(
            "bind_addr = \"0.0.0.0:9000\"\n[gate]\nenforce_ownership_on_edit = true\n",
        )
        .unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert!(c.gate.enforce_ownership_on_edit);
        assert_eq!(c.log_level, "info");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 42").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cors_permissive = false").unwrap();
        let c = ServerConfig::load(file.path()).unwrap();
        assert!(!c.cors_permissive);
    }

    #[test]
    fn toml_output_parses_back() {
        let c = ServerConfig::default();
        let raw = c.to_toml_string().unwrap();
        assert_eq!(ServerConfig::from_toml_str(&raw).unwrap(), c);
    }
}
