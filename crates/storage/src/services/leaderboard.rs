//! Read facade over the standings engine and the entity store.
//!
//! Each query loads a fresh snapshot and hands it to the pure fold in
//! [`super::standings`]; there is no cached leaderboard state anywhere.
//! Reads may run concurrently with a submission and see its pre- or
//! post-state, never a partial event.

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::dto::event::EventDetailResponse;
use crate::dto::standings::{
    AverageRankRow, CategoryBreakdownRow, StandingRow, TeamEfficiencyRow,
};
use crate::dto::student::StudentStandingRow;
use crate::error::Result;
use crate::repository::{EventRepository, StudentRepository, TeamRepository};

use super::standings;

/// Current leaderboard, leader first.
pub async fn list_standings(pool: &SqlitePool) -> Result<Vec<StandingRow>> {
    let teams = TeamRepository::new(pool).list().await?;
    let results = EventRepository::new(pool).list_results().await?;

    Ok(standings::compute_standings(&teams, &results))
}

/// Currently leading team; `None` when no teams exist yet.
pub async fn get_leader(pool: &SqlitePool) -> Result<Option<StandingRow>> {
    Ok(list_standings(pool).await?.into_iter().next())
}

/// One event with its per-team results.
pub async fn get_event_detail(pool: &SqlitePool, event_id: i64) -> Result<EventDetailResponse> {
    EventRepository::new(pool).get_detail(event_id).await
}

/// Most recent events with their results.
pub async fn list_recent_events(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<EventDetailResponse>> {
    EventRepository::new(pool).list_recent(limit).await
}

/// Per-team totals split by event category.
pub async fn breakdown_by_category(pool: &SqlitePool) -> Result<Vec<CategoryBreakdownRow>> {
    let teams = TeamRepository::new(pool).list().await?;
    let event_repo = EventRepository::new(pool);
    let events = event_repo.list().await?;
    let results = event_repo.list_results().await?;

    Ok(standings::breakdown_by_category(&teams, &events, &results))
}

/// Mean finishing rank per team, best first.
pub async fn average_ranks(pool: &SqlitePool) -> Result<Vec<AverageRankRow>> {
    let teams = TeamRepository::new(pool).list().await?;
    let results = EventRepository::new(pool).list_results().await?;

    Ok(standings::average_ranks(&teams, &results))
}

/// Roster joined with each student's team standing, ordered by team rank,
/// then class year display order, then name. `top_n` keeps only students
/// whose team is ranked at or above that position.
pub async fn list_students_by_standing(
    pool: &SqlitePool,
    top_n: Option<i64>,
) -> Result<Vec<StudentStandingRow>> {
    let current = list_standings(pool).await?;
    let by_team: HashMap<i64, (i64, i64)> = current
        .iter()
        .map(|row| (row.team_id, (row.rank, row.total_points)))
        .collect();

    let mut roster = StudentRepository::new(pool).list_roster().await?;
    roster.retain(|entry| match by_team.get(&entry.team_id) {
        Some(&(rank, _)) => top_n.is_none_or(|n| rank <= n),
        None => false,
    });
    roster.sort_by(|a, b| {
        let a_rank = by_team[&a.team_id].0;
        let b_rank = by_team[&b.team_id].0;
        a_rank
            .cmp(&b_rank)
            .then_with(|| a.display_order.cmp(&b.display_order))
            .then_with(|| a.last_name.cmp(&b.last_name))
            .then_with(|| a.first_name.cmp(&b.first_name))
    });

    Ok(roster
        .into_iter()
        .map(|entry| {
            let (rank, total_points) = by_team[&entry.team_id];
            StudentStandingRow {
                team_rank: rank,
                student_id: entry.student_id,
                first_name: entry.first_name,
                last_name: entry.last_name,
                email: entry.email,
                team_name: entry.team_name,
                color: entry.color,
                class_name: entry.class_name,
                team_total_points: total_points,
            }
        })
        .collect())
}

/// Points-per-student ratio per team, most efficient first.
pub async fn team_efficiency(pool: &SqlitePool) -> Result<Vec<TeamEfficiencyRow>> {
    let current = list_standings(pool).await?;
    let counts: HashMap<i64, i64> = StudentRepository::new(pool)
        .count_by_team()
        .await?
        .into_iter()
        .collect();

    let mut rows: Vec<TeamEfficiencyRow> = current
        .into_iter()
        .map(|row| {
            let student_count = counts.get(&row.team_id).copied().unwrap_or(0);
            TeamEfficiencyRow {
                team_id: row.team_id,
                team_name: row.team_name,
                student_count,
                total_points: row.total_points,
                points_per_student: standings::points_per_student(row.total_points, student_count),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points_per_student
            .cmp(&a.points_per_student)
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    Ok(rows)
}
