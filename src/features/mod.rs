pub mod auth;
pub mod health;
pub mod leaderboard;
pub mod reports;
pub mod statistics;
pub mod users;
