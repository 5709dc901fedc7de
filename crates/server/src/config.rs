//! Server configuration read from the environment.
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use runtime::{DecayConfig, RuntimeConfig, TokenIssuer};

/// Everything the binary needs to start.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// SQLite file, or [`ServerConfig::IN_MEMORY`] for a throwaway store.
    pub database_path: String,
    pub jwt_secret: String,
    pub log_dir: Option<PathBuf>,
    pub runtime: RuntimeConfig,
}

impl ServerConfig {
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_DATABASE_PATH: &'static str = "./pets.db";
    pub const IN_MEMORY: &'static str = ":memory:";

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `JWT_SECRET` - token signing key (required, non-empty)
    /// - `PORT` - listen port (default: 3000)
    /// - `BIND_ADDR` - listen address (default: 0.0.0.0)
    /// - `DATABASE_PATH` - SQLite file, `:memory:` for no persistence (default: ./pets.db)
    /// - `TOKEN_TTL_SECS` - token lifetime in seconds (default: 3600)
    /// - `BCRYPT_COST` - password hashing cost (default: 10)
    /// - `DECAY_ENABLED` - run the decay worker (default: true)
    /// - `DECAY_PERIOD_SECS` - seconds between decay sweeps (default: 30)
    /// - `DECAY_AMOUNT` - stat points removed per sweep (default: 4)
    /// - `STORAGE_TIMEOUT_MS` - per-call storage timeout (default: 5000)
    /// - `LOG_DIR` - also write logs to `<LOG_DIR>/server.log`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .context("JWT_SECRET must be set to a non-empty value")?;

        let mut runtime = RuntimeConfig::default();
        let mut decay = DecayConfig::default();

        if let Some(enabled) = read_bool(&lookup, "DECAY_ENABLED")? {
            decay.enabled = enabled;
        }
        if let Some(secs) = read::<u64, _>(&lookup, "DECAY_PERIOD_SECS")? {
            if secs == 0 {
                bail!("DECAY_PERIOD_SECS must be at least 1");
            }
            decay.period = Duration::from_secs(secs);
        }
        if let Some(amount) = read::<u32, _>(&lookup, "DECAY_AMOUNT")? {
            decay.amount = amount;
        }
        runtime.decay = decay;

        if let Some(secs) = read::<u64, _>(&lookup, "TOKEN_TTL_SECS")? {
            let ttl = Duration::from_secs(secs);
            if secs == 0 || ttl > TokenIssuer::MAX_TTL {
                bail!(
                    "TOKEN_TTL_SECS must be between 1 and {}",
                    TokenIssuer::MAX_TTL.as_secs()
                );
            }
            runtime.token_ttl = ttl;
        }
        if let Some(cost) = read::<u32, _>(&lookup, "BCRYPT_COST")? {
            runtime.bcrypt_cost = cost;
        }
        if let Some(millis) = read::<u64, _>(&lookup, "STORAGE_TIMEOUT_MS")? {
            runtime.storage_timeout = Duration::from_millis(millis.max(1));
        }

        Ok(Self {
            bind_addr: read(&lookup, "BIND_ADDR")?.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: read(&lookup, "PORT")?.unwrap_or(Self::DEFAULT_PORT),
            database_path: lookup("DATABASE_PATH")
                .unwrap_or_else(|| Self::DEFAULT_DATABASE_PATH.to_string()),
            jwt_secret,
            log_dir: lookup("LOG_DIR").map(PathBuf::from),
            runtime,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    pub fn in_memory(&self) -> bool {
        self.database_path == Self::IN_MEMORY
    }
}

/// Parse `key` if set. A value that does not parse is an error, not a default.
fn read<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|err| anyhow::anyhow!("invalid {key}={raw:?}: {err}")),
        None => Ok(None),
    }
}

fn read_bool<F>(lookup: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => bail!("invalid {key}={raw:?}: expected a boolean"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn secret_is_required() {
        let err = config(&[]).unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
        assert!(config(&[("JWT_SECRET", "   ")]).is_err());
    }

    #[test]
    fn defaults() {
        let config = config(&[("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
        assert_eq!(config.database_path, "./pets.db");
        assert!(!config.in_memory());
        assert!(config.log_dir.is_none());
        assert_eq!(config.runtime.decay, DecayConfig::default());
        assert_eq!(config.runtime.token_ttl, Duration::from_secs(3600));
        assert_eq!(config.runtime.bcrypt_cost, 10);
        assert_eq!(config.runtime.storage_timeout, Duration::from_millis(5000));
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("DATABASE_PATH", ":memory:"),
            ("DECAY_ENABLED", "off"),
            ("DECAY_PERIOD_SECS", "5"),
            ("DECAY_AMOUNT", "2"),
            ("TOKEN_TTL_SECS", "60"),
            ("BCRYPT_COST", "4"),
            ("STORAGE_TIMEOUT_MS", "250"),
            ("LOG_DIR", "/tmp/everwyn"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert!(config.in_memory());
        assert!(!config.runtime.decay.enabled);
        assert_eq!(config.runtime.decay.period, Duration::from_secs(5));
        assert_eq!(config.runtime.decay.amount, 2);
        assert_eq!(config.runtime.token_ttl, Duration::from_secs(60));
        assert_eq!(config.runtime.bcrypt_cost, 4);
        assert_eq!(config.runtime.storage_timeout, Duration::from_millis(250));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/everwyn")));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(config(&[("JWT_SECRET", "s"), ("PORT", "eighty")]).is_err());
        assert!(config(&[("JWT_SECRET", "s"), ("DECAY_ENABLED", "maybe")]).is_err());
        assert!(config(&[("JWT_SECRET", "s"), ("DECAY_PERIOD_SECS", "0")]).is_err());
    }

    #[test]
    fn token_lifetime_is_bounded() {
        for ttl in ["0", "31536001", "9223372036854775807", "18446744073709551615"] {
            let err = config(&[("JWT_SECRET", "s"), ("TOKEN_TTL_SECS", ttl)]).unwrap_err();
            assert!(err.to_string().contains("TOKEN_TTL_SECS"), "{ttl}: {err}");
        }

        let config = config(&[("JWT_SECRET", "s"), ("TOKEN_TTL_SECS", "31536000")]).unwrap();
        assert_eq!(config.runtime.token_ttl, TokenIssuer::MAX_TTL);
        let issuer = TokenIssuer::new("s", config.runtime.token_ttl).unwrap();
        issuer.issue(runtime::UserId(1)).unwrap();
    }
}
