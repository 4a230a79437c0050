use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::statistics::dtos::{ReportsByStatusDto, StatisticsDto};
use crate::modules::storage::{Database, JsonStore};

pub struct StatisticsService {
    store: Arc<JsonStore>,
}

impl StatisticsService {
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }

    /// Aggregate totals over the current data
    pub async fn get(&self) -> Result<StatisticsDto> {
        Ok(self.store.read(summarize).await)
    }
}

fn summarize(db: &Database) -> StatisticsDto {
    let mut reports_by_status = ReportsByStatusDto::default();
    let mut waste_type_distribution = BTreeMap::new();

    for report in &db.reports {
        reports_by_status.increment(report.status);
        for classification in &report.waste_classifications {
            *waste_type_distribution
                .entry(classification.waste_type)
                .or_insert(0) += 1;
        }
    }

    StatisticsDto {
        total_reports: db.reports.len() as u32,
        total_cleanups: db
            .cleanups
            .iter()
            .filter(|c| c.verification.verified)
            .count() as u32,
        total_users: db.users.len() as u32,
        total_points_awarded: db.users.iter().map(|u| u64::from(u.points)).sum(),
        reports_by_status,
        waste_type_distribution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{Cleanup, CreateReport, Report, ReportStatus};
    use crate::features::users::models::User;
    use crate::modules::vision::{CleanupVerification, WasteClassification, WasteType};
    use uuid::Uuid;

    fn report(status: ReportStatus, types: &[WasteType]) -> Report {
        let mut report = Report::new(CreateReport {
            latitude: 0.0,
            longitude: 0.0,
            address: "Somewhere".to_string(),
            description: String::new(),
            image_url: "/uploads/a.png".to_string(),
            original_image_path: "uploads/a.png".to_string(),
            reporter_id: "anonymous".to_string(),
            waste_classifications: types
                .iter()
                .map(|&waste_type| WasteClassification {
                    waste_type,
                    confidence: 50,
                })
                .collect(),
            points_awarded: 10,
        });
        report.status = status;
        report
    }

    fn cleanup(verified: bool) -> Cleanup {
        Cleanup::new(
            Uuid::new_v4(),
            None,
            "/uploads/b.png".to_string(),
            "uploads/b.png".to_string(),
            CleanupVerification {
                verified,
                similarity: 80,
                message: String::new(),
            },
        )
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&Database::default());

        assert_eq!(stats.total_reports, 0);
        assert_eq!(stats.reports_by_status, ReportsByStatusDto::default());
        assert!(stats.waste_type_distribution.is_empty());

        let body = serde_json::to_value(&stats).unwrap();
        assert_eq!(body["reportsByStatus"]["verified"], 0);
    }

    #[test]
    fn test_summarize_counts() {
        let mut alice = User::new("alice".into(), "a@example.com".into(), "h".into());
        alice.points = 60;
        let mut bob = User::new("bob".into(), "b@example.com".into(), "h".into());
        bob.points = 10;

        let db = Database {
            reports: vec![
                report(ReportStatus::Reported, &[WasteType::Plastic, WasteType::Glass]),
                report(ReportStatus::Verified, &[WasteType::Plastic]),
                report(ReportStatus::Cleaned, &[]),
            ],
            users: vec![alice, bob],
            cleanups: vec![cleanup(true), cleanup(false)],
        };

        let stats = summarize(&db);

        assert_eq!(stats.total_reports, 3);
        assert_eq!(stats.total_cleanups, 1);
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_points_awarded, 70);
        assert_eq!(
            stats.reports_by_status,
            ReportsByStatusDto {
                reported: 1,
                claimed: 0,
                cleaned: 1,
                verified: 1,
            }
        );
        assert_eq!(stats.waste_type_distribution[&WasteType::Plastic], 2);
        assert_eq!(stats.waste_type_distribution[&WasteType::Glass], 1);

        let body = serde_json::to_value(&stats).unwrap();
        assert_eq!(body["wasteTypeDistribution"]["plastic"], 2);
    }
}
