use chrono::NaiveDate;

use crate::Database;
use crate::dto::class_year::CreateClassYearRequest;
use crate::dto::event::{SubmitEventRequest, TeamResultEntry};
use crate::dto::team::CreateTeamRequest;
use crate::repository::{ClassYearRepository, TeamRepository};

pub(crate) async fn memory_db() -> Database {
    Database::in_memory().await.unwrap()
}

/// Seed the original four-team roster; returns the ids in creation order.
pub(crate) async fn seed_teams(db: &Database) -> Vec<i64> {
    let repo = TeamRepository::new(db.pool());
    let mut ids = Vec::new();
    for (team_name, color) in [
        ("Athena", "blue"),
        ("Poseidon", "teal"),
        ("Artemis", "green"),
        ("Apollo", "gold"),
    ] {
        let team = repo
            .create(&CreateTeamRequest {
                team_name: team_name.to_string(),
                color: Some(color.to_string()),
            })
            .await
            .unwrap();
        ids.push(team.team_id);
    }
    ids
}

pub(crate) async fn seed_class_year(db: &Database) -> i64 {
    ClassYearRepository::new(db.pool())
        .create(&CreateClassYearRequest {
            grad_year: 2027,
            class_name: "Junior".to_string(),
            display_order: 2,
        })
        .await
        .unwrap()
        .class_year_id
}

pub(crate) fn submit_request(
    description: &str,
    category: &str,
    entries: &[(i64, i64, i64)],
) -> SubmitEventRequest {
    SubmitEventRequest {
        event_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
        description: description.to_string(),
        category: category.to_string(),
        results: entries
            .iter()
            .map(|&(team_id, points_earned, rank)| TeamResultEntry {
                team_id,
                points_earned,
                rank,
            })
            .collect(),
    }
}
