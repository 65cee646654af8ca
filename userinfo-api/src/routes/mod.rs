pub(crate) mod error;
pub(crate) mod health;
pub(crate) mod user_info;

pub(crate) use error::ApiError;
