mod error;
pub mod models;
pub mod ports;
pub mod projection;
pub mod services;

pub use error::*;
