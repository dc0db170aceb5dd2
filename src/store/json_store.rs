use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::stats::UserStats;
use crate::store::schema::{IdentityData, StatsData};

const IDENTITY_FILE: &str = "identity.json";
const STATS_FILE: &str = "stats.json";

/// Local persistent cache: one file for the identity string, one for the
/// stats blob. Writes are atomic (tmp + rename) so an interrupted save never
/// leaves a torn file behind.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizdr");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Load and parse a cache file. `None` if the file is absent, unreadable
    /// or unparsable; a bad cache is never an error, just a cold start.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.file_path(name);
        let content = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_identity(&self) -> Option<String> {
        let data: IdentityData = self.load(IDENTITY_FILE)?;
        if data.needs_reset() || data.email.is_empty() {
            return None;
        }
        Some(data.email)
    }

    pub fn save_identity(&self, email: &str) -> Result<()> {
        self.save(IDENTITY_FILE, &IdentityData::new(email))
    }

    pub fn load_stats(&self) -> Option<UserStats> {
        let data: StatsData = self.load(STATS_FILE)?;
        if data.needs_reset() {
            return None;
        }
        Some(data.stats)
    }

    pub fn save_stats(&self, stats: &UserStats) -> Result<()> {
        self.save(STATS_FILE, &StatsData::new(stats))
    }

    /// A complete cached session (identity plus stats) restores the app
    /// straight to the home screen without re-login.
    pub fn load_session(&self) -> Option<(String, UserStats)> {
        let email = self.load_identity()?;
        let stats = self.load_stats()?;
        Some((email, stats))
    }
}
