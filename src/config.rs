use std::env;

/// Application configuration, read once at startup.
///
/// The values here are immutable for the lifetime of the process and are
/// passed explicitly into the components that need them (the token service,
/// the connection pool, the healthcheck). Missing required variables abort
/// startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub auth_secret_key: String,
    /// Access token lifetime in minutes.
    pub access_token_expire_minutes: i64,
    pub project_name: String,
    pub app_version: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            auth_secret_key: env::var("AUTH_SECRET_KEY").expect("AUTH_SECRET_KEY must be set"),
            access_token_expire_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|_| "1440".to_string())
                .parse()
                .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be a number"),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "Todos Backend".to_string()),
            app_version: env::var("APP_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
