use std::sync::Arc;

use crate::core::error::Result;
use crate::features::leaderboard::dtos::LeaderboardEntryDto;
use crate::modules::storage::JsonStore;
use crate::shared::constants::LEADERBOARD_LIMIT;

pub struct LeaderboardService {
    store: Arc<JsonStore>,
}

impl LeaderboardService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Users ranked by points, highest first.
    ///
    /// Ties keep registration order.
    pub async fn top(&self) -> Result<Vec<LeaderboardEntryDto>> {
        let mut entries: Vec<LeaderboardEntryDto> = self
            .store
            .read(|db| db.users.iter().map(LeaderboardEntryDto::from).collect())
            .await;

        entries.sort_by(|a, b| b.points.cmp(&a.points));
        entries.truncate(LEADERBOARD_LIMIT);

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::User;

    async fn store_with_points(points: &[u32]) -> (tempfile::TempDir, Arc<JsonStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::open(dir.path()).await.unwrap());
        let points = points.to_vec();
        store
            .write(move |db| {
                for (i, p) in points.into_iter().enumerate() {
                    let mut user = User::new(
                        format!("user{}", i),
                        format!("user{}@example.com", i),
                        "hash".to_string(),
                    );
                    user.points = p;
                    db.users.push(user);
                }
                Ok(())
            })
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_sorted_by_points_with_stable_ties() {
        let (_dir, store) = store_with_points(&[10, 50, 10, 0]).await;
        let service = LeaderboardService::new(store);

        let entries = service.top().await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.username.as_str()).collect();

        assert_eq!(names, vec!["user1", "user0", "user2", "user3"]);
    }

    #[tokio::test]
    async fn test_truncated_to_limit() {
        let points: Vec<u32> = (0..(LEADERBOARD_LIMIT as u32 + 5)).collect();
        let (_dir, store) = store_with_points(&points).await;
        let service = LeaderboardService::new(store);

        let entries = service.top().await.unwrap();

        assert_eq!(entries.len(), LEADERBOARD_LIMIT);
        assert_eq!(entries[0].points, LEADERBOARD_LIMIT as u32 + 4);
    }
}
