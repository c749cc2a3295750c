use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderName;
use rolegate_core::AppError;
use tracing_subscriber::EnvFilter;

/// What the binary does after loading configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiCommand {
    Serve,
    Migrate,
    Seed,
}

impl ApiCommand {
    fn parse(argument: Option<&str>) -> Result<Self, AppError> {
        match argument {
            None | Some("serve") => Ok(Self::Serve),
            Some("migrate") => Ok(Self::Migrate),
            Some("seed") => Ok(Self::Seed),
            Some(other) => Err(AppError::Validation(format!(
                "unknown command '{other}', expected 'serve', 'migrate' or 'seed'"
            ))),
        }
    }
}

/// Storage adapters backing the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub storage: StorageBackend,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub principal_header: HeaderName,
    pub admin_role_name: String,
    pub seed_superuser_subject: Option<String>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let command = ApiCommand::parse(env::args().nth(1).as_deref())?;

        let storage = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_owned())
            .as_str()
        {
            "postgres" => StorageBackend::Postgres {
                database_url: required_env("DATABASE_URL")?,
                max_connections: parse_max_connections(
                    env::var("DATABASE_MAX_CONNECTIONS").ok(),
                )?,
            },
            "memory" => StorageBackend::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "STORAGE_BACKEND must be either 'postgres' or 'memory', got '{other}'"
                )));
            }
        };

        if storage == StorageBackend::Memory && command != ApiCommand::Serve {
            return Err(AppError::Validation(
                "the memory storage backend only supports the 'serve' command".to_owned(),
            ));
        }

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let principal_header = env::var("PRINCIPAL_HEADER")
            .unwrap_or_else(|_| "x-authenticated-subject".to_owned());
        let principal_header = HeaderName::from_str(principal_header.trim()).map_err(|error| {
            AppError::Validation(format!("invalid PRINCIPAL_HEADER: {error}"))
        })?;

        let admin_role_name = env::var("ADMIN_ROLE_NAME")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "Super Administrator".to_owned());
        let seed_superuser_subject = env::var("SEED_SUPERUSER_SUBJECT")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            command,
            storage,
            frontend_url,
            api_host,
            api_port,
            principal_header,
            admin_role_name,
            seed_superuser_subject,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_max_connections(value: Option<String>) -> Result<u32, AppError> {
    let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
        return Ok(10);
    };

    match value.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(AppError::Validation(format!(
            "DATABASE_MAX_CONNECTIONS must be a positive integer, got '{value}'"
        ))),
        Ok(count) => Ok(count),
    }
}

fn required_env(name: &str) -> Result<String, AppError> {
    let value = env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{ApiCommand, parse_max_connections};

    #[test]
    fn command_defaults_to_serve() {
        assert_eq!(ApiCommand::parse(None).ok(), Some(ApiCommand::Serve));
        assert_eq!(ApiCommand::parse(Some("seed")).ok(), Some(ApiCommand::Seed));
        assert!(ApiCommand::parse(Some("drop")).is_err());
    }

    #[test]
    fn max_connections_defaults_and_rejects_zero() {
        assert_eq!(parse_max_connections(None).ok(), Some(10));
        assert_eq!(parse_max_connections(Some(" 4 ".to_owned())).ok(), Some(4));
        assert!(parse_max_connections(Some("0".to_owned())).is_err());
        assert!(parse_max_connections(Some("many".to_owned())).is_err());
    }
}
