use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::projector::{DEFAULT_PAGE_SIZE, DEFAULT_VISIBLE_PER_STAGE};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the dashboard service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub projection: ProjectionConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let ansi = env::var("APP_LOG_ANSI")
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        let page_size = read_count("ATS_PAGE_SIZE", DEFAULT_PAGE_SIZE)
            .map_err(|_| ConfigError::InvalidPageSize)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        let visible_per_stage = read_count("ATS_STAGE_PREVIEW", DEFAULT_VISIBLE_PER_STAGE)
            .map_err(|_| ConfigError::InvalidStagePreview)?;

        let directory = env::var("ATS_SEED_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level, ansi },
            projection: ProjectionConfig {
                page_size,
                visible_per_stage,
            },
            seed: SeedConfig { directory },
        })
    }
}

fn read_count(key: &str, default: usize) -> Result<usize, std::num::ParseIntError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<usize>(),
        Err(_) => Ok(default),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
}

/// List view defaults applied when a request leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionConfig {
    pub page_size: usize,
    pub visible_per_stage: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            visible_per_stage: DEFAULT_VISIBLE_PER_STAGE,
        }
    }
}

/// Optional directory of `<kind>.json` files loaded into the stores at startup.
#[derive(Debug, Clone, Default)]
pub struct SeedConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPageSize,
    InvalidStagePreview,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPageSize => {
                write!(f, "ATS_PAGE_SIZE must be a positive integer")
            }
            ConfigError::InvalidStagePreview => {
                write!(f, "ATS_STAGE_PREVIEW must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPageSize
            | ConfigError::InvalidStagePreview => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_ANSI",
            "ATS_PAGE_SIZE",
            "ATS_STAGE_PREVIEW",
            "ATS_SEED_DIR",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.ansi);
        assert_eq!(config.projection, ProjectionConfig::default());
        assert!(config.seed.directory.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_projection_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ATS_PAGE_SIZE", "25");
        env::set_var("ATS_STAGE_PREVIEW", "3");
        env::set_var("ATS_SEED_DIR", "/srv/ats/seed");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.projection.page_size, 25);
        assert_eq!(config.projection.visible_per_stage, 3);
        assert_eq!(config.seed.directory, Some(PathBuf::from("/srv/ats/seed")));
        reset_env();
    }

    #[test]
    fn rejects_zero_page_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ATS_PAGE_SIZE", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidPageSize)
        ));
        env::set_var("ATS_PAGE_SIZE", "ten");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidPageSize)
        ));
        reset_env();
    }
}
