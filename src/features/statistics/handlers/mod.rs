pub mod statistics_handler;

pub use statistics_handler::{__path_get_statistics, get_statistics};
