use std::{net::SocketAddr, time::Duration};

use anyhow::{anyhow, Context};
use solarbond_irradiance::provider::nasa_power::DEFAULT_BASE_URL;
use solarbond_ledger::config::{DEFAULT_CONTRACT_ADDRESS, DEFAULT_RPC_URL, SEPOLIA_CHAIN_ID};

/// Where the audit core gets its irradiance from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Cached in the SQLite database, survives restarts.
    Sqlite,
    /// Cached in process memory.
    Memory,
    /// Every audit goes to the provider.
    Off,
}

impl std::str::FromStr for CacheMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(CacheMode::Sqlite),
            "memory" => Ok(CacheMode::Memory),
            "off" | "none" => Ok(CacheMode::Off),
            other => Err(anyhow!(
                "Invalid SB_IRRADIANCE_CACHE '{}': expected sqlite, memory or off",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub irradiance_base_url: String,
    pub irradiance_timeout: Duration,
    pub irradiance_cache: CacheMode,
    pub ledger_rpc_url: String,
    pub ledger_private_key: Option<String>,
    pub ledger_contract: String,
    pub ledger_chain_id: u64,
    pub ledger_timeout: Duration,
    pub seed_file: Option<String>,
    pub log_format: LogFormat,
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {} '{}': {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = var_or("SB_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid SB_LISTEN_ADDR")?;
        let db_path = var_or("SB_DB_PATH", "./db/solarbond.db");
        let cors_allow = var_or("SB_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_var("SB_REQUEST_TIMEOUT_MS", 30000)?;
        let irradiance_timeout_secs: u64 = parse_var("SB_IRRADIANCE_TIMEOUT_SECS", 10)?;
        let ledger_timeout_secs: u64 = parse_var("SB_LEDGER_TIMEOUT_SECS", 15)?;
        let log_format = if var_or("SB_LOG_FORMAT", "text").eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        };

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            irradiance_base_url: var_or("SB_IRRADIANCE_BASE_URL", DEFAULT_BASE_URL),
            irradiance_timeout: Duration::from_secs(irradiance_timeout_secs),
            irradiance_cache: parse_var("SB_IRRADIANCE_CACHE", CacheMode::Sqlite)?,
            ledger_rpc_url: var_or("SB_LEDGER_RPC_URL", DEFAULT_RPC_URL),
            ledger_private_key: optional_var("SB_LEDGER_PRIVATE_KEY"),
            ledger_contract: var_or("SB_LEDGER_CONTRACT", DEFAULT_CONTRACT_ADDRESS),
            ledger_chain_id: parse_var("SB_LEDGER_CHAIN_ID", SEPOLIA_CHAIN_ID)?,
            ledger_timeout: Duration::from_secs(ledger_timeout_secs),
            seed_file: optional_var("SB_SEED_FILE"),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_mode_parsing() {
        assert_eq!("sqlite".parse::<CacheMode>().unwrap(), CacheMode::Sqlite);
        assert_eq!(" Memory ".parse::<CacheMode>().unwrap(), CacheMode::Memory);
        assert_eq!("off".parse::<CacheMode>().unwrap(), CacheMode::Off);
        assert!("redis".parse::<CacheMode>().is_err());
    }
}
