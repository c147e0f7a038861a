pub mod auth;
pub mod role_service;
pub mod session_service;
pub mod user_service;

pub use auth::AuthService;
pub use role_service::RoleService;
pub use session_service::SessionService;
pub use user_service::UserService;
