/// Points credited to a registered reporter for every new report
pub const REPORT_POINTS: u32 = 10;

/// Points credited to the cleaner once a cleanup is verified
pub const CLEANUP_POINTS: u32 = 50;

/// Maximum number of entries returned by the leaderboard
pub const LEADERBOARD_LIMIT: usize = 100;

/// Reporter id used when a report is submitted without an account
pub const ANONYMOUS_REPORTER: &str = "anonymous";

/// Address stored when the reporter leaves it blank
pub const DEFAULT_ADDRESS: &str = "Address not provided";

/// Public URL prefix under which uploaded images are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";
