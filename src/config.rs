//! Service configuration

use std::env;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// Path the endpoint is mounted on, also the base of pagination links
    pub public_path: String,
    pub github: GithubConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GithubConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl ServiceConfig {
    /// Load defaults, then `config/default.toml`, then `config/{RUN_MODE}.toml`,
    /// then `USER_SEARCH__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::builder(&run_mode)?
            .add_source(
                Environment::with_prefix("USER_SEARCH")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    fn builder(run_mode: &str) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("log_level", "info")?
            .set_default("public_path", "/users")?
            .set_default("github.endpoint", "https://api.github.com/graphql")?
            .set_default(
                "github.user_agent",
                concat!("github-user-search/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("github.timeout_secs", 10)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false)))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
