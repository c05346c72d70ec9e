use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use letterhead_core::constants;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str =
            env::var("PORT").unwrap_or_else(|_| constants::DEFAULT_PORT.to_string());
        let port = parse_port(&port_str)?;

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let database_path = env::var("LETTERHEAD_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|_| constants::database_file());

        Ok(Config {
            port,
            cors_origin,
            database_path,
        })
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    let port = value.parse::<u16>()?;
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port_valid() {
        assert_eq!(parse_port("4020").unwrap(), 4020);
    }

    #[test]
    fn test_parse_port_zero_rejected() {
        assert!(matches!(
            parse_port("0"),
            Err(ConfigError::PortOutOfRange(0))
        ));
    }

    #[test]
    fn test_parse_port_garbage_rejected() {
        assert!(matches!(
            parse_port("not-a-port"),
            Err(ConfigError::InvalidPort(_))
        ));
    }
}
