use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;

pub const LISTEN_ADDR_ENV: &str = "SNIP_LISTEN_ADDR";
pub const STORE_BACKEND_ENV: &str = "SNIP_STORE_BACKEND";
pub const DATABASE_URL_ENV: &str = "SNIP_DATABASE_URL";
pub const ID_STRATEGY_ENV: &str = "SNIP_ID_STRATEGY";
pub const ID_LENGTH_ENV: &str = "SNIP_ID_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "SNIP_MAX_ATTEMPTS";
pub const CACHE_TTL_SECS_ENV: &str = "SNIP_CACHE_TTL_SECS";
pub const CACHE_SWEEP_SECS_ENV: &str = "SNIP_CACHE_SWEEP_SECS";
pub const CACHE_CAPACITY_ENV: &str = "SNIP_CACHE_CAPACITY";
pub const NO_CACHE_ENV: &str = "SNIP_NO_CACHE";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:snip.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackendArg {
    #[value(name = "sqlite")]
    Sqlite,
    #[value(name = "in-memory")]
    InMemory,
}

impl Display for StoreBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackendArg::Sqlite => write!(f, "sqlite"),
            StoreBackendArg::InMemory => write!(f, "in-memory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdStrategyArg {
    /// Uniform draws from the 62-symbol alphanumeric alphabet, with
    /// collision retry.
    #[value(name = "random")]
    Random,
    /// Truncated SHA-256 of the URL: idempotent re-shortening, but a
    /// genuine collision fails the create.
    #[value(name = "hash")]
    Hash,
}

impl Display for IdStrategyArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IdStrategyArg::Random => write!(f, "random"),
            IdStrategyArg::Hash => write!(f, "hash"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "snip-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    #[arg(
        long,
        env = STORE_BACKEND_ENV,
        value_enum,
        default_value_t = StoreBackendArg::Sqlite
    )]
    pub store: StoreBackendArg,

    #[arg(long, env = DATABASE_URL_ENV, default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    #[arg(
        long,
        env = ID_STRATEGY_ENV,
        value_enum,
        default_value_t = IdStrategyArg::Random
    )]
    pub id_strategy: IdStrategyArg,

    /// Length of generated short ids (3-32).
    #[arg(long, env = ID_LENGTH_ENV, default_value_t = snip_core::short_id::DEFAULT_LENGTH)]
    pub id_length: usize,

    /// Candidate attempts per create under the random strategy.
    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = snip_engine::DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Cache entry time-to-live, in seconds.
    #[arg(long, env = CACHE_TTL_SECS_ENV, default_value_t = 3600)]
    pub cache_ttl_secs: u64,

    /// Background cache sweep interval, in seconds. 0 disables the sweep.
    #[arg(long, env = CACHE_SWEEP_SECS_ENV, default_value_t = 7200)]
    pub cache_sweep_secs: u64,

    /// Optional cache capacity bound; unbounded when omitted.
    #[arg(long, env = CACHE_CAPACITY_ENV)]
    pub cache_capacity: Option<u64>,

    /// Disable the resolution cache entirely.
    #[arg(long, env = NO_CACHE_ENV, default_value_t = false)]
    pub no_cache: bool,
}
