//! Server configuration
//!
//! Every option can be given as a flag or an environment variable; a `.env`
//! file in the working directory is read first.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use bookshelf_core::logging_facility::Profile;
use bookshelf_core::{CombinationServiceImpl, JoinStrategy};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogProfile {
    /// Human-readable logs at debug level
    Development,
    /// JSON logs at info level
    Production,
}

impl From<LogProfile> for Profile {
    fn from(profile: LogProfile) -> Self {
        match profile {
            LogProfile::Development => Profile::Development,
            LogProfile::Production => Profile::Production,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JoinStrategyArg {
    NestedScan,
    Indexed,
}

impl From<JoinStrategyArg> for JoinStrategy {
    fn from(arg: JoinStrategyArg) -> Self {
        match arg {
            JoinStrategyArg::NestedScan => JoinStrategy::NestedScan,
            JoinStrategyArg::Indexed => JoinStrategy::Indexed,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "bookshelf")]
#[command(about = "Bookshelf - in-memory books and authors service", long_about = None)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "BOOKSHELF_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(long, env = "BOOKSHELF_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Log output format
    #[arg(long, env = "BOOKSHELF_LOG_PROFILE", value_enum, default_value_t = LogProfile::Development)]
    pub log_profile: LogProfile,

    /// Upper bound for the concurrent book/author fetch, in milliseconds
    #[arg(long, env = "BOOKSHELF_FETCH_TIMEOUT_MS")]
    pub fetch_timeout_ms: Option<u64>,

    /// Algorithm used to join books to authors
    #[arg(long, env = "BOOKSHELF_JOIN_STRATEGY", value_enum, default_value_t = JoinStrategyArg::NestedScan)]
    pub join_strategy: JoinStrategyArg,
}

impl ServerConfig {
    /// Load `.env` (if present) and parse flags and environment
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }

    /// Build the combination service described by this configuration
    pub fn combination_service(&self) -> CombinationServiceImpl {
        let service = CombinationServiceImpl::new(self.join_strategy.into());
        match self.fetch_timeout() {
            Some(timeout) => service.with_fetch_timeout(timeout),
            None => service,
        }
    }
}
