use std::env;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017";
const DEFAULT_MONGO_DB: &str = "EventPlanner";
const DEFAULT_PORT: u16 = 3000;

pub struct Config {
    pub mongo_url: String,
    pub mongo_db: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_url: env::var("MONGO_URL").unwrap_or_else(|_| DEFAULT_MONGO_URL.to_string()),
            mongo_db: env::var("MONGO_DB").unwrap_or_else(|_| DEFAULT_MONGO_DB.to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}
