use std::{env, str::FromStr};

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            "test" => Self::Test,
            _ => Self::Production,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub environment: Environment,
    pub max_connections: u32,
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn init() -> Config {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            format!(
                "postgres://{}:{}@{}:{}/{}",
                get("DB_USER", "postgres"),
                get("DB_PASSWORD", "postgres"),
                get("DB_HOST", "localhost"),
                get("DB_PORT", "5432"),
                get("DB_DATABASE", "blog"),
            )
        });

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Config {
            database_url,
            port: parse_or(&lookup, "PORT", 3000),
            environment: Environment::parse(&get("APP_ENV", "production")),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10),
            cors_origins,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value {raw:?} for {key}, using {default}");
            default
        }),
        None => default,
    }
}
