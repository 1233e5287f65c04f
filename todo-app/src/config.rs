use serde::Deserialize;

pub const ENV_PREFIX: &str = "TODO_APP";

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default = "default_show_banner")]
    pub show_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            show_banner: default_show_banner(),
        }
    }
}

impl Config {
    /// Loads configuration from `TODO_APP_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_environment(environment: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_show_banner() -> bool {
    true
}
