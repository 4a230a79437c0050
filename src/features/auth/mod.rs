pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use model::AuthenticatedUser;
pub use services::TokenService;
