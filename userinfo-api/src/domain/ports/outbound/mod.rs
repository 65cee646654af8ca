mod credential_store;
mod key_value_store;
mod search_backend;

pub use credential_store::*;
pub use key_value_store::*;
pub use search_backend::*;

#[cfg(test)]
pub mod mock;
