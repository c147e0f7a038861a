pub mod api;
pub mod bootstrap;
pub mod config;
pub mod console;
pub mod database;
pub mod domain;
pub mod models;
pub mod services;
pub mod shared;

pub use config::*;
