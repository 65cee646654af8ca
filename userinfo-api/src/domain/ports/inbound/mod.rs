mod user_info;

pub use user_info::*;
