//! HTTP request handlers.

pub mod pull_request_handler;
pub mod team_handler;
pub mod user_handler;

pub use pull_request_handler::pull_request_routes;
pub use team_handler::team_routes;
pub use user_handler::user_routes;
