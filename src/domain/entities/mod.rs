pub mod permission;
pub mod role;
pub mod session;
pub mod user;

pub use permission::*;
pub use role::*;
pub use session::*;
pub use user::*;
