use async_trait::async_trait;

use crate::domain::{models::ApplicationIdentity, UserInfoError};

#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Newest credential row registered for `token`, if any.
    async fn find_latest_by_token(
        &self,
        token: &str,
    ) -> Result<Option<ApplicationIdentity>, UserInfoError>;

    async fn ping(&self) -> Result<(), UserInfoError>;
}
