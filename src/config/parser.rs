use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Environment variable that overrides `[database] path`
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use page_analyzer::config::load_config;
///
/// let config = load_config(Path::new("page-analyzer.toml")).unwrap();
/// println!("Database: {}", config.database.path);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

impl Config {
    /// Applies overrides from the process environment
    ///
    /// Only the binary entry point calls this; library code receives the
    /// resulting `Config` explicitly.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(std::env::var(DATABASE_PATH_ENV).ok())
    }

    fn apply_overrides(&mut self, database_path: Option<String>) -> Result<(), ConfigError> {
        if let Some(path) = database_path {
            tracing::debug!("Database path overridden by {}", DATABASE_PATH_ENV);
            self.database.path = path;
        }
        validate(self)
    }
}
