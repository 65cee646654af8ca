use async_trait::async_trait;

use crate::domain::{
    models::{Location, LocationAccount, SearchCriteria, User, UserAccount},
    UserInfoError,
};

#[async_trait]
pub trait UserInfoService: Send + Sync + 'static {
    async fn get_user_by_uuid(&self, uuid: &str) -> Result<User, UserInfoError>;

    async fn get_users_by_uuids(&self, uuids: &[String]) -> Result<Vec<User>, UserInfoError>;

    async fn get_location_by_location_id(
        &self,
        location_id: &str,
    ) -> Result<Location, UserInfoError>;

    async fn get_locations_by_location_ids(
        &self,
        location_ids: &[String],
    ) -> Result<Vec<Location>, UserInfoError>;

    async fn search_users(&self, criteria: SearchCriteria) -> Result<Vec<User>, UserInfoError>;

    async fn search_locations(
        &self,
        criteria: SearchCriteria,
    ) -> Result<Vec<Location>, UserInfoError>;

    async fn get_user_accounts(&self, uuids: &[String]) -> Result<Vec<UserAccount>, UserInfoError>;

    async fn get_location_accounts(
        &self,
        location_ids: &[String],
    ) -> Result<Vec<LocationAccount>, UserInfoError>;
}
