//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::FaucetConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FaucetConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FaucetConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration from a file if one is given, defaults otherwise.
///
/// A missing optional file is not an error; the defaults describe the
/// mainnet faucet.
pub fn load_config_or_default(path: Option<&Path>) -> Result<FaucetConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(FaucetConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_valid_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("stx_faucet_test_config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[polling]\ninterval_secs = 45").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.polling.interval_secs, 45);

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = std::env::temp_dir();
        let path = dir.join("stx_faucet_test_bad_config.toml");
        fs::write(&path, "[polling\ninterval_secs = 45").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/faucet.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_no_path_yields_defaults() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.contract.name, "stxfaucet");
    }
}
