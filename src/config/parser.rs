use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates a configuration file
///
/// Sections and keys missing from the file keep their defaults, so an empty
/// file is a valid configuration.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Hex-encoded SHA-256 of the configuration file as stored on disk
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    Ok(hash_content(&std::fs::read(path)?))
}

/// Like [`load_config`], also returning the hash of the exact text parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(content.as_bytes())))
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn hash_content(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}
