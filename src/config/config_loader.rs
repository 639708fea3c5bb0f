use anyhow::{Ok, Result};

use super::config_model::{AuthTokens, Database, DotEnvyConfig, Server};

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    Ok(DotEnvyConfig { server, database })
}

pub fn get_auth_tokens() -> Result<AuthTokens> {
    dotenvy::dotenv().ok();

    Ok(AuthTokens {
        jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET is invalid"),
        ttl_seconds: std::env::var("JWT_TTL_SECONDS")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()?,
    })
}
