//! Standings aggregation over the raw event-result log.
//!
//! Every function here is a pure fold over a snapshot passed in by the
//! caller. Nothing is cached: the log is small (classroom scale) and
//! recomputing on every read keeps the write path free of invalidation
//! logic. None of these functions can fail; an empty log yields zeroed
//! rows, not an error.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::dto::standings::{AverageRankRow, CategoryBreakdownRow, StandingRow};
use crate::models::{Event, EventResult, Team};

#[derive(Debug, Default, Clone, Copy)]
struct TeamAccumulator {
    total_points: i64,
    events_participated: i64,
    wins: i64,
    second_place: i64,
    third_place: i64,
    fourth_place: i64,
}

/// Fold the result log into the ranked leaderboard.
///
/// Rows are ordered by total points descending; equal totals fall back to
/// team name ascending, so the order never depends on storage iteration
/// order. `points_ahead` is the margin over the next row and is computed
/// only after the order is fixed; the last row has no team below it.
pub fn compute_standings(teams: &[Team], results: &[EventResult]) -> Vec<StandingRow> {
    let mut accumulators: HashMap<i64, TeamAccumulator> = HashMap::new();

    for result in results {
        let acc = accumulators.entry(result.team_id).or_default();
        acc.total_points += result.points_earned;
        // (event_id, team_id) is the row identity, so each row is a
        // distinct event for this team.
        acc.events_participated += 1;
        match result.rank {
            1 => acc.wins += 1,
            2 => acc.second_place += 1,
            3 => acc.third_place += 1,
            4 => acc.fourth_place += 1,
            _ => {}
        }
    }

    let mut rows: Vec<StandingRow> = teams
        .iter()
        .map(|team| {
            let acc = accumulators
                .remove(&team.team_id)
                .unwrap_or_default();
            StandingRow {
                rank: 0,
                team_id: team.team_id,
                team_name: team.team_name.clone(),
                color: team.color.clone(),
                total_points: acc.total_points,
                events_participated: acc.events_participated,
                wins: acc.wins,
                second_place: acc.second_place,
                third_place: acc.third_place,
                fourth_place: acc.fourth_place,
                points_ahead: None,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_points
            .cmp(&a.total_points)
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    let next_totals: Vec<Option<i64>> = (0..rows.len())
        .map(|i| rows.get(i + 1).map(|next| next.total_points))
        .collect();

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i as i64 + 1;
        row.points_ahead = next_totals[i].map(|next| row.total_points - next);
    }

    rows
}

/// First row of the leaderboard, or `None` when there are no teams at all.
/// An empty result log with teams present still yields a leader.
pub fn leader(teams: &[Team], results: &[EventResult]) -> Option<StandingRow> {
    compute_standings(teams, results).into_iter().next()
}

/// Per (team, category) totals with a 2-decimal average. Pairs with no
/// events in the category are omitted entirely, so no division by zero
/// can occur.
pub fn breakdown_by_category(
    teams: &[Team],
    events: &[Event],
    results: &[EventResult],
) -> Vec<CategoryBreakdownRow> {
    let categories: HashMap<i64, &str> = events
        .iter()
        .map(|event| (event.event_id, event.category.as_str()))
        .collect();
    let team_names: HashMap<i64, &Team> =
        teams.iter().map(|team| (team.team_id, team)).collect();

    let mut buckets: HashMap<(i64, String), (i64, i64)> = HashMap::new();
    for result in results {
        let Some(category) = categories.get(&result.event_id) else {
            continue;
        };
        if !team_names.contains_key(&result.team_id) {
            continue;
        }
        let bucket = buckets
            .entry((result.team_id, (*category).to_string()))
            .or_default();
        bucket.0 += result.points_earned;
        bucket.1 += 1;
    }

    let mut rows: Vec<CategoryBreakdownRow> = buckets
        .into_iter()
        .map(|((team_id, category), (points, event_count))| CategoryBreakdownRow {
            team_id,
            team_name: team_names[&team_id].team_name.clone(),
            category,
            points,
            event_count,
            average_points: (Decimal::from(points) / Decimal::from(event_count)).round_dp(2),
        })
        .collect();

    rows.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| b.points.cmp(&a.points))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    rows
}

/// Mean finishing rank per team, ascending (lower is better). Teams that
/// have not participated in any event are omitted.
pub fn average_ranks(teams: &[Team], results: &[EventResult]) -> Vec<AverageRankRow> {
    let mut rank_sums: HashMap<i64, (i64, i64)> = HashMap::new();
    for result in results {
        let entry = rank_sums.entry(result.team_id).or_default();
        entry.0 += result.rank;
        entry.1 += 1;
    }

    let mut rows: Vec<AverageRankRow> = teams
        .iter()
        .filter_map(|team| {
            let (rank_sum, count) = rank_sums.get(&team.team_id).copied()?;
            Some(AverageRankRow {
                team_id: team.team_id,
                team_name: team.team_name.clone(),
                average_rank: (Decimal::from(rank_sum) / Decimal::from(count)).round_dp(2),
                events_participated: count,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.average_rank
            .cmp(&b.average_rank)
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    rows
}

/// Points-per-student ratio, 0 for a team with no students.
pub fn points_per_student(total_points: i64, student_count: i64) -> Decimal {
    if student_count <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(total_points) / Decimal::from(student_count)).round_dp(2)
}
