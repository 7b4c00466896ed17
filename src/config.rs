use std::env;

/// Group every piece is stored under unless `PIECE_GROUP` says otherwise.
pub const DEFAULT_PIECE_GROUP: &str = "default_piece";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub max_pool_size: u32,
    pub piece_group: String,
    pub template_dir: String,
    pub identity_header: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://pieces.db".to_string()),
            max_pool_size: env::var("MAX_POOL_SIZE")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPoolSize)?,
            piece_group: env::var("PIECE_GROUP")
                .unwrap_or_else(|_| DEFAULT_PIECE_GROUP.to_string()),
            template_dir: env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string()),
            identity_header: env::var("IDENTITY_HEADER")
                .unwrap_or_else(|_| "x-authenticated-user".to_string()),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            database_url: "sqlite://pieces.db".to_string(),
            max_pool_size: 5,
            piece_group: DEFAULT_PIECE_GROUP.to_string(),
            template_dir: "templates".to_string(),
            identity_header: "x-authenticated-user".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid pool size")]
    InvalidPoolSize,
}
