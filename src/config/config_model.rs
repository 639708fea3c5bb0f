#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Signing material for issued tokens. Loaded on demand, kept out of the
/// main config struct.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub jwt_secret: String,
    pub ttl_seconds: u64,
}
