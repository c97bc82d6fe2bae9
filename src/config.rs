use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. When unset the in-memory store is used.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    /// Session lifetime in hours.
    pub jwt_maxage: i64,
    /// Shared key the identity provider presents to open sessions. Login is
    /// disabled when unset.
    pub api_key: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn init() -> Config {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let jwt_secret = env::var("JWT_SECRET_KEY").unwrap_or_else(|_| {
            panic!("🔒 JWT_SECRET_KEY environment variable must be set and non-empty!");
        });

        if jwt_secret.is_empty() {
            panic!("🔒 JWT_SECRET_KEY cannot be empty!");
        }

        let jwt_maxage = env::var("JWT_MAXAGE")
            .ok()
            .and_then(|maxage| maxage.parse::<i64>().ok())
            .unwrap_or(24);

        let api_key = env::var("API_KEY").ok().filter(|key| !key.is_empty());

        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(8080);

        Config {
            database_url,
            jwt_secret,
            jwt_maxage,
            api_key,
            port,
        }
    }
}
