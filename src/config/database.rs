use mongodb::options::{ClientOptions, Credential, ServerAddress};
use mongodb::{Client, Database};
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DATABASE: &str = "stocksDB";
const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 27017;
const AUTH_SOURCE: &str = "admin";
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing env: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidVar { key: &'static str, value: String },
    #[error("failed to connect to MongoDB: {0}")]
    Connect(#[from] mongodb::error::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionSource {
    Uri(String),
    Parts {
        user: String,
        password: String,
        host: String,
        port: u16,
    },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub source: ConnectionSource,
    pub database: String,
}

impl DatabaseConfig {
    /// `MONGODB_URI` wins over `MONGO_USER`, `MONGO_PASSWORD`, `MONGO_HOST` and `MONGO_PORT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let source = match env::var("MONGODB_URI") {
            Ok(uri) => ConnectionSource::Uri(uri),
            Err(_) => Self::source_from_parts()?,
        };
        let database =
            env::var("MONGODB_DATABASE").unwrap_or_else(|_| DEFAULT_DATABASE.to_string());

        Ok(Self { source, database })
    }

    fn source_from_parts() -> Result<ConnectionSource, ConfigError> {
        let user = env::var("MONGO_USER").map_err(|_| ConfigError::MissingVar("MONGO_USER"))?;
        let password =
            env::var("MONGO_PASSWORD").map_err(|_| ConfigError::MissingVar("MONGO_PASSWORD"))?;
        let host = env::var("MONGO_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = match env::var("MONGO_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                key: "MONGO_PORT",
                value: raw,
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(ConnectionSource::Parts {
            user,
            password,
            host,
            port,
        })
    }

    pub async fn client_options(&self) -> Result<ClientOptions, ConfigError> {
        match &self.source {
            ConnectionSource::Uri(uri) => Ok(ClientOptions::parse(uri).await?),
            ConnectionSource::Parts {
                user,
                password,
                host,
                port,
            } => {
                let credential = Credential::builder()
                    .username(user.clone())
                    .password(password.clone())
                    .source(AUTH_SOURCE.to_string())
                    .build();

                Ok(ClientOptions::builder()
                    .hosts(vec![ServerAddress::Tcp {
                        host: host.clone(),
                        port: Some(*port),
                    }])
                    .credential(credential)
                    .direct_connection(true)
                    .server_selection_timeout(SERVER_SELECTION_TIMEOUT)
                    .build())
            }
        }
    }
}

pub async fn connect(config: &DatabaseConfig) -> Result<Database, ConfigError> {
    let options = config.client_options().await?;
    let client = Client::with_options(options)?;
    Ok(client.database(&config.database))
}
