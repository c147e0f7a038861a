pub mod role_repository;
pub mod session_repository;
pub mod user_repository;
