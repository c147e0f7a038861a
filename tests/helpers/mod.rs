#![allow(unused_imports)]
pub mod test_db;
pub mod rbac_helpers;

pub use test_db::*;
pub use rbac_helpers::*;
