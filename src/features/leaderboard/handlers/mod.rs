pub mod leaderboard_handler;

pub use leaderboard_handler::{__path_get_leaderboard, get_leaderboard};
