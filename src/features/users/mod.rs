//! User accounts feature.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/users/register` | Create an account, returns user + token |
//! | POST | `/api/users/login` | Exchange email/password for user + token |
//! | GET | `/api/users/{id}` | Public profile with points and counters |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
