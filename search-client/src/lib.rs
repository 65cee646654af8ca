mod client;
mod error;
mod query;
mod response;
mod sanitize;

pub use client::*;
pub use error::SearchClientError;
pub use query::*;
pub use response::*;
pub use sanitize::*;
