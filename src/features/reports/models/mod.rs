mod cleanup;
mod report;

pub use cleanup::Cleanup;
pub use report::{CreateReport, Report, ReportStatus};
