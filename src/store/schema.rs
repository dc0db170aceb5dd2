use serde::{Deserialize, Serialize};

use crate::stats::UserStats;

const SCHEMA_VERSION: u32 = 1;

/// Cached identity of the last logged-in user.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentityData {
    pub schema_version: u32,
    pub email: String,
}

impl IdentityData {
    pub fn new(email: &str) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            email: email.to_string(),
        }
    }

    /// A stale schema version means the cache cannot be trusted.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}

/// Cached stats blob, in the same wire format the remote store uses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatsData {
    pub schema_version: u32,
    pub stats: UserStats,
}

impl StatsData {
    pub fn new(stats: &UserStats) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            stats: stats.clone(),
        }
    }

    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
