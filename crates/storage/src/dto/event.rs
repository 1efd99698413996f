use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Request payload for recording one event and all of its per-team results.
/// The whole payload is persisted in a single transaction.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitEventRequest {
    pub event_date: NaiveDate,

    #[validate(length(
        min = 1,
        max = 500,
        message = "Description must be between 1 and 500 characters"
    ))]
    pub description: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: String,

    #[validate(length(min = 1, message = "An event needs at least one participating team"))]
    #[validate(custom(function = "validate_result_entries"))]
    pub results: Vec<TeamResultEntry>,
}

/// One team's placement in a submitted event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResultEntry {
    pub team_id: i64,
    pub points_earned: i64,
    pub rank: i64,
}

// Ranks must form a subset of a permutation of 1..=N for N submitted
// entries; the schema's UNIQUE/CHECK constraints are only a backstop.
fn validate_result_entries(entries: &[TeamResultEntry]) -> Result<(), ValidationError> {
    let count = entries.len() as i64;

    for entry in entries {
        if entry.points_earned < 0 {
            return Err(entry_error(
                "negative_points",
                format!("negative points for team {}", entry.team_id),
            ));
        }
        if entry.rank < 1 || entry.rank > count {
            return Err(entry_error(
                "rank_out_of_range",
                format!("rank out of range: {} is not in 1..={count}", entry.rank),
            ));
        }
    }

    let mut seen_teams = Vec::with_capacity(entries.len());
    let mut seen_ranks = Vec::with_capacity(entries.len());
    for entry in entries {
        if seen_teams.contains(&entry.team_id) {
            return Err(entry_error(
                "duplicate_team",
                format!("team {} appears more than once", entry.team_id),
            ));
        }
        if seen_ranks.contains(&entry.rank) {
            return Err(entry_error(
                "rank_collision",
                format!("rank collision: rank {} assigned twice", entry.rank),
            ));
        }
        seen_teams.push(entry.team_id);
        seen_ranks.push(entry.rank);
    }

    Ok(())
}

fn entry_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Response describing one event together with its per-team results
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventDetailResponse {
    pub event_id: i64,
    pub event_date: NaiveDate,
    pub description: String,
    pub category: String,
    pub created_at: NaiveDateTime,
    /// Ordered by rank, best placement first.
    pub results: Vec<EventResultDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventResultDetail {
    pub team_name: String,
    pub points_earned: i64,
    pub rank: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(entries: Vec<TeamResultEntry>) -> SubmitEventRequest {
        SubmitEventRequest {
            event_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            description: "Spring trivia night".to_string(),
            category: "academic".to_string(),
            results: entries,
        }
    }

    fn entry(team_id: i64, points_earned: i64, rank: i64) -> TeamResultEntry {
        TeamResultEntry {
            team_id,
            points_earned,
            rank,
        }
    }

    #[test]
    fn test_valid_full_field_accepted() {
        let req = request(vec![entry(1, 100, 2), entry(2, 200, 1)]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_results_rejected() {
        let req = request(vec![]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rank_collision_rejected() {
        let req = request(vec![entry(1, 100, 1), entry(2, 200, 1)]);
        let message = req.validate().unwrap_err().to_string();
        assert!(message.contains("rank collision"), "{message}");
    }

    #[test]
    fn test_rank_above_participant_count_rejected() {
        // Rank 3 with two participants: inside the original's fixed 1..4
        // window but outside 1..=N.
        let req = request(vec![entry(1, 100, 1), entry(2, 200, 3)]);
        let message = req.validate().unwrap_err().to_string();
        assert!(message.contains("rank out of range"), "{message}");
    }

    #[test]
    fn test_rank_zero_rejected() {
        let req = request(vec![entry(1, 100, 0)]);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_points_rejected() {
        let req = request(vec![entry(1, -5, 1)]);
        let message = req.validate().unwrap_err().to_string();
        assert!(message.contains("negative points"), "{message}");
    }

    #[test]
    fn test_duplicate_team_rejected() {
        let req = request(vec![entry(1, 100, 1), entry(1, 50, 2)]);
        let message = req.validate().unwrap_err().to_string();
        assert!(message.contains("more than once"), "{message}");
    }

    #[test]
    fn test_zero_points_allowed() {
        // Participation with zero points is legal; only row absence means
        // "did not participate".
        let req = request(vec![entry(1, 0, 1)]);
        assert!(req.validate().is_ok());
    }
}
