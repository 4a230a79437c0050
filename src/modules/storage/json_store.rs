//! In-memory collections persisted as whole-file JSON snapshots
//!
//! The three collections live behind one async mutex. A write runs the
//! mutation on a copy, stages all three files next to their targets, renames
//! them into place, and only then swaps the copy in. Concurrent requests
//! cannot interleave a read-modify-write.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::core::error::Result;
use crate::features::reports::models::{Cleanup, Report};
use crate::features::users::models::User;

const REPORTS_FILE: &str = "reports.json";
const USERS_FILE: &str = "users.json";
const CLEANUPS_FILE: &str = "cleanups.json";

/// Everything the platform stores
#[derive(Debug, Default, Clone)]
pub struct Database {
    pub reports: Vec<Report>,
    pub users: Vec<User>,
    pub cleanups: Vec<Cleanup>,
}

impl Database {
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id.to_string() == id)
    }

    pub fn find_user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id.to_string() == id)
    }

    pub fn find_report(&self, id: uuid::Uuid) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn find_report_mut(&mut self, id: uuid::Uuid) -> Option<&mut Report> {
        self.reports.iter_mut().find(|r| r.id == id)
    }
}

/// Snapshot-persisted store shared by all services
pub struct JsonStore {
    data_dir: PathBuf,
    db: Mutex<Database>,
}

impl JsonStore {
    /// Create the data directory if needed and load any existing snapshots.
    ///
    /// A snapshot that cannot be read or parsed is logged and its collection
    /// starts empty.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir).await?;

        let db = Database {
            reports: load_collection(&data_dir.join(REPORTS_FILE)).await,
            users: load_collection(&data_dir.join(USERS_FILE)).await,
            cleanups: load_collection(&data_dir.join(CLEANUPS_FILE)).await,
        };

        info!(
            "Data loaded from {}: reports={}, users={}, cleanups={}",
            data_dir.display(),
            db.reports.len(),
            db.users.len(),
            db.cleanups.len()
        );

        Ok(Self {
            data_dir,
            db: Mutex::new(db),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Run a read-only query against the current data
    pub async fn read<T>(&self, query: impl FnOnce(&Database) -> T) -> T {
        let db = self.db.lock().await;
        query(&db)
    }

    /// Apply a mutation and persist the result.
    ///
    /// When `mutation` fails or the snapshot cannot be written, the in-memory
    /// data is left untouched.
    pub async fn write<T>(&self, mutation: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let mut db = self.db.lock().await;
        let mut draft = db.clone();
        let output = mutation(&mut draft)?;

        self.persist(&draft).await?;
        *db = draft;

        Ok(output)
    }

    /// Stage every snapshot as a temp file, then rename them into place.
    ///
    /// A failed serialization or temp write leaves all three files untouched.
    async fn persist(&self, db: &Database) -> Result<()> {
        let snapshots = [
            (REPORTS_FILE, serde_json::to_string_pretty(&db.reports)?),
            (USERS_FILE, serde_json::to_string_pretty(&db.users)?),
            (CLEANUPS_FILE, serde_json::to_string_pretty(&db.cleanups)?),
        ];

        let mut staged = Vec::with_capacity(snapshots.len());
        for (file, json) in snapshots {
            let target = self.data_dir.join(file);
            let tmp_path = target.with_extension("json.tmp");
            if let Err(e) = tokio::fs::write(&tmp_path, json).await {
                error!("Error staging {}: {}", tmp_path.display(), e);
                for (staged_tmp, _) in &staged {
                    let _ = tokio::fs::remove_file(staged_tmp).await;
                }
                return Err(e.into());
            }
            staged.push((tmp_path, target));
        }

        for (tmp_path, target) in staged {
            tokio::fs::rename(&tmp_path, &target).await?;
        }

        debug!("Snapshots written to {}", self.data_dir.display());
        Ok(())
    }
}

async fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            error!("Error loading data from {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        error!("Error parsing data from {}: {}", path.display(), e);
        Vec::new()
    })
}
