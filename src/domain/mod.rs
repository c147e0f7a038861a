pub mod access;
pub mod catalog;
pub mod entities;
pub mod errors;
pub mod guard;
pub mod ports;
pub mod route_map;
pub mod selection;
pub mod services;
