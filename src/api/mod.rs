pub mod auth;
pub mod middleware;
pub mod permissions;
pub mod roles;
pub mod router;
pub mod users;

pub use router::build_router;
