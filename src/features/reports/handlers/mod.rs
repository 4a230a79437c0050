pub mod report_handler;

pub use report_handler::{
    __path_claim_report, __path_create_report, __path_get_report, __path_list_cleanups,
    __path_list_reports, __path_submit_cleanup, claim_report, create_report, get_report,
    list_cleanups, list_reports, submit_cleanup,
};
