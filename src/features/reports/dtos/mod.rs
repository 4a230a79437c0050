mod report_dto;

pub use report_dto::{
    CleanupInput, CleanupResponseDto, CleanupSubmissionResponseDto, ClaimReportDto, ImageUpload,
    NewReportInput, ReportListQuery, ReportResponseDto, SubmitCleanupDto, UploadReportDto,
};
