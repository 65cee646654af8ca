mod account;
mod entity;
mod identity;
mod location;
mod search;
mod user;

pub use account::*;
pub use entity::*;
pub use identity::*;
pub use location::*;
pub use search::*;
pub use user::*;
