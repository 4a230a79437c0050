use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored user record as persisted in `users.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never returned by the API
    pub password_hash: String,
    pub points: u32,
    pub reports_created: u32,
    pub cleanups_completed: u32,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            points: 0,
            reports_created: 0,
            cleanups_completed: 0,
            created_at: Utc::now(),
        }
    }

    /// Credit a newly created report
    pub fn record_report(&mut self, points: u32) {
        self.points += points;
        self.reports_created += 1;
    }

    /// Credit a verified cleanup
    pub fn record_cleanup(&mut self, points: u32) {
        self.points += points;
        self.cleanups_completed += 1;
    }
}
