mod authenticator;
mod extractor;
mod identity_cache;

pub use authenticator::{ApplicationAuthenticator, AuthError};
pub use extractor::AuthApplication;
pub use identity_cache::{IdentityCache, IdentityCachePolicy, MokaIdentityCache};
