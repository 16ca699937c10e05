pub mod config {
    use serde::Deserialize;

    /// Prefix shared by every environment variable the server reads.
    const ENV_PREFIX: &str = "TODO";

    #[derive(Deserialize, Debug, Clone, PartialEq)]
    pub struct Config {
        #[serde(default = "default_db_url")]
        pub db_url: String,
        #[serde(default = "default_host")]
        pub host: String,
        #[serde(default = "default_port")]
        pub port: u16,
        /// Development mode: verbose logs, including every SQL statement.
        #[serde(default = "default_debug")]
        pub debug: bool,
    }

    impl Config {
        /// Loads configuration from `TODO_*` environment variables, falling back to defaults.
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
        }

        fn from_environment(environment: config::Environment) -> anyhow::Result<Self> {
            let settings = config::Config::builder()
                .add_source(environment.try_parsing(true))
                .build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }
    }

    fn default_db_url() -> String {
        "sqlite://todo.db?mode=rwc".to_string()
    }

    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    fn default_port() -> u16 {
        5000
    }

    fn default_debug() -> bool {
        true
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn environment(vars: &[(&str, &str)]) -> config::Environment {
            let source = vars
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            config::Environment::with_prefix(ENV_PREFIX).source(Some(source))
        }

        #[test]
        fn can_fall_back_to_development_defaults() {
            let config = Config::from_environment(environment(&[])).unwrap();

            assert_eq!(
                config,
                Config {
                    db_url: "sqlite://todo.db?mode=rwc".to_string(),
                    host: "127.0.0.1".to_string(),
                    port: 5000,
                    debug: true,
                }
            );
        }

        #[test]
        fn can_override_defaults_from_environment() {
            let config = Config::from_environment(environment(&[
                ("TODO_DB_URL", "sqlite::memory:"),
                ("TODO_PORT", "8081"),
                ("TODO_DEBUG", "false"),
            ]))
            .unwrap();

            assert_eq!(config.db_url, "sqlite::memory:");
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.port, 8081);
            assert!(!config.debug);
        }
    }
}
pub mod entities;
pub mod task;
pub mod web;
