// Configuration - genesis settings for the ledger and logging setup

use crate::identity::Identity;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Genesis configuration, copied into the ledger and frozen there
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The only identity allowed to open proposals
    pub admin: Identity,
}

impl LedgerConfig {
    pub fn new(admin: Identity) -> Self {
        Self { admin }
    }

    pub fn with_admin(mut self, admin: Identity) -> Self {
        self.admin = admin;
        self
    }
}

/// Logging configuration for binaries embedding the ledger
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,
    /// Include the event target (module path) in each line
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            with_target: false,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: &str) -> Self {
        self.filter = filter.to_string();
        self
    }

    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    /// `RUST_LOG` wins over the configured default
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }

    /// Install a global fmt subscriber. Returns false if one was already set.
    pub fn init(&self) -> bool {
        tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_target(self.with_target)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    }
}
