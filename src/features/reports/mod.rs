//! Report lifecycle feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/reports` | Upload a photo of a trash site (multipart) |
//! | GET | `/api/reports` | List reports, filter by `status` / `userId` |
//! | GET | `/api/reports/{id}` | Get one report |
//! | POST | `/api/reports/{id}/claim` | Claim a reported site |
//! | POST | `/api/reports/{id}/cleanup` | Submit a cleanup photo (multipart) |
//! | GET | `/api/reports/{id}/cleanups` | Cleanup history of a report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReportService;
