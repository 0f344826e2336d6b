use crate::api::ListScope;
use clap::Args;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Command-line overrides shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file path
    #[arg(short, long, global = true, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Backend API root, including the `/api` prefix
    #[arg(long, global = true, env = "API_BASE_URL")]
    pub base_url: Option<String>,

    /// Admin bearer token obtained from `admin login`
    #[arg(long, global = true, env = "ADMIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Listing the collection fetches read from (featured|all)
    #[arg(long, global = true)]
    pub scope: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub scope: ListScope,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl AppConfig {
    /// Defaults, then the config file, then `DEVFOLIO_*` variables, then `args`.
    pub fn load(args: &ConfigArgs) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("api.base_url", "http://localhost:3003/api")?
            .set_default("store.scope", "featured")?
            .set_default("logging.format", "pretty")?
            .set_default("logging.level", "info")?;

        // An explicit file must exist; ./devfolio.{yaml,toml,json} is optional.
        builder = match &args.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None => builder.add_source(File::with_name("devfolio").required(false)),
        };

        // E.g. DEVFOLIO_API__BASE_URL=https://example.com/api
        builder = builder.add_source(
            Environment::with_prefix("DEVFOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Priority: CLI flag > CLI env var > DEVFOLIO_* env > config file > defaults.
        if let Some(url) = &args.base_url {
            builder = builder.set_override("api.base_url", url.as_str())?;
        }
        if let Some(token) = &args.token {
            builder = builder.set_override("api.token", token.as_str())?;
        }
        if let Some(scope) = &args.scope {
            builder = builder.set_override("store.scope", scope.to_lowercase())?;
        }
        if let Some(json) = args.log_json {
            builder = builder.set_override("logging.format", if json { "json" } else { "pretty" })?;
        }

        builder.build()?.try_deserialize()
    }
}
