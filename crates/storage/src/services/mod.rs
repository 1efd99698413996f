pub mod leaderboard;
pub mod standings;
