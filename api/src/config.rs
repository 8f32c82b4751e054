use std::env;

use anyhow::{anyhow, Context};

/// Lowest cost bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Credentials of the admin account created at startup
#[derive(Clone)]
pub struct AdminCredentials {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Created at startup when no user has this login
    pub bootstrap_admin: Option<AdminCredentials>,
    pub bcrypt_cost: u32,
    /// Sustained requests per second per IP on login and pincode routes
    pub login_rate_per_second: u64,
    pub login_rate_burst: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let port = match lookup("PORT") {
            Some(p) => p.parse().context("PORT must be a valid port number")?,
            None => 8080,
        };

        let bootstrap_admin = match (lookup("ADMIN_LOGIN"), lookup("ADMIN_PASSWORD")) {
            (Some(login), Some(password)) => Some(AdminCredentials { login, password }),
            (Some(_), None) | (None, Some(_)) => {
                return Err(anyhow!(
                    "ADMIN_LOGIN and ADMIN_PASSWORD must be set together"
                ))
            }
            (None, None) => None,
        };

        let bcrypt_cost = lookup("BCRYPT_COST")
            .and_then(|c| c.parse::<u32>().ok())
            .unwrap_or(DEFAULT_BCRYPT_COST)
            .clamp(MIN_BCRYPT_COST, MAX_BCRYPT_COST);

        let login_rate_per_second = lookup("LOGIN_RATE_PER_SECOND")
            .and_then(|r| r.parse().ok())
            .filter(|r| *r > 0)
            .unwrap_or(2);
        let login_rate_burst = lookup("LOGIN_RATE_BURST")
            .and_then(|b| b.parse().ok())
            .filter(|b| *b > 0)
            .unwrap_or(5);

        Ok(Self {
            database_url,
            port,
            bootstrap_admin,
            bcrypt_cost,
            login_rate_per_second,
            login_rate_burst,
        })
    }
}
