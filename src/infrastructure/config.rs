use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    #[serde(default = "default_upstream_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            static_dir: None,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            timeout_seconds: default_upstream_timeout(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("PLACEHOLDER").separator("__"));
        let cfg = builder.build()?;
        let mut config: Config = cfg.try_deserialize()?;

        // Deployment platforms hand the listen port over as a bare PORT variable.
        if let Ok(port) = env::var("PORT") {
            if !port.trim().is_empty() {
                config.app.port = port.trim().parse().map_err(|_| {
                    config::ConfigError::Message(format!("PORT is not a valid port number: {port}"))
                })?;
            }
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_upstream_base_url() -> String {
    "https://jsonplaceholder.typicode.com".to_string()
}

fn default_upstream_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::Config;
    use serial_test::serial;
    use std::env;

    fn clear_env_vars() {
        env::remove_var("PORT");
        env::remove_var("PLACEHOLDER__APP__PORT");
        env::remove_var("PLACEHOLDER__UPSTREAM__BASE_URL");
    }

    #[test]
    #[serial]
    fn defaults_point_at_jsonplaceholder() {
        clear_env_vars();

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(
            config.upstream.base_url,
            "https://jsonplaceholder.typicode.com"
        );
        assert_eq!(config.app.port, 5000);
        assert_eq!(config.upstream.timeout_seconds, 30);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    #[serial]
    fn prefixed_env_overrides_upstream_base_url() {
        clear_env_vars();
        env::set_var("PLACEHOLDER__UPSTREAM__BASE_URL", "http://localhost:3100");

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(config.upstream.base_url, "http://localhost:3100");

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn bare_port_variable_wins_over_default() {
        clear_env_vars();
        env::set_var("PORT", "8123");

        let config = Config::from_env().expect("expected configuration to load");

        assert_eq!(config.app.port, 8123);

        clear_env_vars();
    }

    #[test]
    #[serial]
    fn malformed_port_variable_is_rejected() {
        clear_env_vars();
        env::set_var("PORT", "not-a-port");

        let error = Config::from_env().expect_err("expected configuration to fail");
        assert!(error.to_string().contains("not a valid port number"));

        clear_env_vars();
    }
}
