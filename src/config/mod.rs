use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub max_connections: u32,
    pub connection_timeout: u64,
    /// Overrides the database name in DATABASE_URL when set.
    pub database_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// bcrypt work factor
    pub password_cost: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub enabled: bool,
    pub superadmin_username: String,
    pub superadmin_password: String,
    pub superadmin_email: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HR_API_HOST") {
            self.server.host = v;
        }
        if let Some(v) = env::var("HR_API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("STORE_BACKEND") {
            self.database.backend = match v.to_ascii_lowercase().as_str() {
                "memory" | "mem" => StoreBackend::Memory,
                "postgres" | "pg" => StoreBackend::Postgres,
                _ => self.database.backend,
            };
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("HR_DATABASE_NAME") {
            self.database.database_name = Some(v).filter(|s| !s.trim().is_empty());
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_PASSWORD_COST") {
            self.security.password_cost = v.parse().unwrap_or(self.security.password_cost);
        }

        // Seed overrides
        if let Ok(v) = env::var("SEED_ENABLED") {
            self.seed.enabled = v.parse().unwrap_or(self.seed.enabled);
        }
        if let Ok(v) = env::var("SEED_SUPERADMIN_USERNAME") {
            self.seed.superadmin_username = v;
        }
        if let Ok(v) = env::var("SEED_SUPERADMIN_PASSWORD") {
            self.seed.superadmin_password = v;
        }
        if let Ok(v) = env::var("SEED_SUPERADMIN_EMAIL") {
            self.seed.superadmin_email = v;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                max_connections: 10,
                connection_timeout: 30,
                database_name: None,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                jwt_secret: "dev-only-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                password_cost: 10,
            },
            seed: SeedConfig {
                enabled: true,
                superadmin_username: "superadmin".to_string(),
                superadmin_password: "superadmin123".to_string(),
                superadmin_email: "superadmin@example.com".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: true,
            },
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                max_connections: 20,
                connection_timeout: 10,
                database_name: None,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                password_cost: 12,
            },
            seed: SeedConfig {
                enabled: true,
                superadmin_username: "superadmin".to_string(),
                superadmin_password: String::new(),
                superadmin_email: "superadmin@example.com".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                enable_request_logging: false,
            },
            database: DatabaseConfig {
                backend: StoreBackend::Postgres,
                max_connections: 50,
                connection_timeout: 5,
                database_name: None,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 8,
                password_cost: 12,
            },
            seed: SeedConfig {
                enabled: false,
                superadmin_username: "superadmin".to_string(),
                superadmin_password: String::new(),
                superadmin_email: "superadmin@example.com".to_string(),
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
