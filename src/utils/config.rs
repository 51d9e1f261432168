use std::env;
use std::path::PathBuf;

/// Default source of the supermarket reference-data file.
const DEFAULT_SUPERMARKETS_URL: &str =
    "https://raw.githubusercontent.com/supermarkt/checkjebon/main/data/supermarkets.json";

/// Immutable process-wide configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Frontend origin allowed by the CORS layer.
    pub cors_allowed_origin: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric HS256 signing key. Required, never hard-coded.
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    /// Token validity in seconds.
    pub token_expiry: i64,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding `users.json` and the per-user grocery files.
    pub data_dir: PathBuf,
    /// Where the startup download fetches the supermarket list from.
    pub supermarkets_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")?,
                jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "basket".to_string()),
                jwt_audience: env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "basket-clients".to_string()),
                token_expiry: env::var("TOKEN_EXPIRY_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()?,
            },
            storage: StorageConfig {
                data_dir: env::var("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".")),
                supermarkets_url: env::var("SUPERMARKETS_URL")
                    .unwrap_or_else(|_| DEFAULT_SUPERMARKETS_URL.to_string()),
            },
        })
    }
}
