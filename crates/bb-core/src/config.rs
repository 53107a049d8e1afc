use serde::{Deserialize, Serialize};

/// Log verbosity for the gateway process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinBotConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Reload-on-change is handled by an external supervisor; the flag and
    /// watch paths are carried in config and logged at startup.
    pub reload_enabled: bool,
    pub watch_paths: Vec<String>,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub command_timeout_secs: u64,
}

impl Default for BinBotConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl BinBotConfig {
    /// Production profile: port 8000, no reload, info logging.
    pub fn production() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8000,
                reload_enabled: false,
                watch_paths: Vec::new(),
                log_level: LogLevel::Info,
            },
            session: SessionConfig { ttl_minutes: 30 },
            engine: EngineConfig { command_timeout_secs: 30 },
        }
    }

    /// Development profile: port 8001, reload enabled, debug logging.
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8001,
                reload_enabled: true,
                watch_paths: vec!["crates".into()],
                log_level: LogLevel::Debug,
            },
            ..Self::production()
        }
    }

    /// Build from the environment. `DEVELOPMENT=true|false` picks the profile;
    /// `API_HOST`, `API_PORT`, `LOG_LEVEL`, `SESSION_TTL_MINUTES`, and
    /// `COMMAND_TIMEOUT_SECS` override individual fields.
    pub fn from_env() -> Self {
        let development = std::env::var("DEVELOPMENT")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let mut cfg = if development {
            Self::development()
        } else {
            Self::production()
        };
        if let Ok(host) = std::env::var("API_HOST") {
            cfg.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            if let Ok(port) = port.parse() {
                cfg.server.port = port;
            }
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&level) {
                cfg.server.log_level = level;
            }
        }
        if let Ok(ttl) = std::env::var("SESSION_TTL_MINUTES") {
            if let Ok(ttl) = ttl.parse() {
                cfg.session.ttl_minutes = ttl;
            }
        }
        if let Ok(timeout) = std::env::var("COMMAND_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                cfg.engine.command_timeout_secs = timeout;
            }
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_defaults() {
        let cfg = BinBotConfig::production();
        assert_eq!(cfg.server.port, 8000);
        assert!(!cfg.server.reload_enabled);
        assert_eq!(cfg.server.log_level, LogLevel::Info);
        assert_eq!(cfg.session.ttl_minutes, 30);
        assert_eq!(cfg.engine.command_timeout_secs, 30);
    }

    #[test]
    fn test_development_defaults() {
        let cfg = BinBotConfig::development();
        assert_eq!(cfg.server.port, 8001);
        assert!(cfg.server.reload_enabled);
        assert_eq!(cfg.server.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
    }
}
