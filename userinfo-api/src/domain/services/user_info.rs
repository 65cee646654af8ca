use std::sync::Arc;

use async_trait::async_trait;
use search_client::{QueryString, SearchQuery, SearchQueryBuilder};

use super::BatchFetcher;
use crate::domain::{
    models::{
        CachedLocationAccount, CachedUserAccount, Location, LocationAccount, SearchCriteria,
        SearchEntity, User, UserAccount,
    },
    ports::{
        inbound::UserInfoService,
        outbound::{KeyValueStore, SearchBackend},
    },
    Backend, UserInfoError, ERROR_KEYWORD_REQUIRED, ERROR_LIMIT_REQUIRED, ERROR_NON_EMPTY_ARRAY,
};

pub struct UserInfoServiceImpl<S: ?Sized, K: ?Sized> {
    search: Arc<S>,
    accounts: BatchFetcher<K>,
}

impl<S, K> UserInfoServiceImpl<S, K>
where
    S: SearchBackend + ?Sized,
    K: KeyValueStore + ?Sized,
{
    pub fn new(search: Arc<S>, cache: Arc<K>) -> Self {
        Self {
            search,
            accounts: BatchFetcher::new(cache),
        }
    }

    async fn run<T: SearchEntity>(&self, query: &SearchQuery) -> Result<Vec<T>, UserInfoError> {
        let hits = self.search.search(T::INDEX, query).await?;
        tracing::debug!(index = %T::INDEX, total = hits.total, returned = hits.documents.len());

        hits.documents
            .into_iter()
            .map(serde_json::from_value::<T>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| UserInfoError::malformed(Backend::Search, e))
    }

    async fn lookup_one<T: SearchEntity>(&self, id: &str) -> Result<T, UserInfoError> {
        let query = SearchQuery::terms_lookup(T::ID_FIELD, [id]);
        self.run::<T>(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| UserInfoError::not_found(format!("Cannot find {} {}", T::KIND, id)))
    }

    async fn lookup_many<T: SearchEntity>(&self, ids: &[String]) -> Result<Vec<T>, UserInfoError> {
        if ids.is_empty() {
            return Err(UserInfoError::invalid_argument(ERROR_NON_EMPTY_ARRAY));
        }
        let query = SearchQuery::terms_lookup(T::ID_FIELD, ids.iter().cloned());
        self.run::<T>(&query).await
    }

    async fn search_entities<T: SearchEntity>(
        &self,
        criteria: SearchCriteria,
    ) -> Result<Vec<T>, UserInfoError> {
        let query = build_search_query::<T>(criteria)?;
        self.run::<T>(&query).await
    }
}

/// Validates `criteria` and turns it into a query against `T`'s index.
fn build_search_query<T: SearchEntity>(
    criteria: SearchCriteria,
) -> Result<SearchQuery, UserInfoError> {
    if criteria.keyword.is_empty() {
        return Err(UserInfoError::invalid_argument(ERROR_KEYWORD_REQUIRED));
    }
    if criteria.limit == 0 {
        return Err(UserInfoError::invalid_argument(ERROR_LIMIT_REQUIRED));
    }

    let fields = if criteria.fields.is_empty() {
        T::DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
    } else {
        criteria.fields
    };

    let mut builder = SearchQueryBuilder::new(fields, QueryString::from_keyword(&criteria.keyword))
        .page(criteria.offset, criteria.limit)
        .filters(criteria.filters);

    if let Some(sort) = criteria.sort.filter(|s| !s.field.is_empty()) {
        builder = builder.sort_by(&sort.field, sort.direction.into());
    }

    Ok(builder.build())
}

#[async_trait]
impl<S, K> UserInfoService for UserInfoServiceImpl<S, K>
where
    S: SearchBackend + ?Sized,
    K: KeyValueStore + ?Sized,
{
    #[tracing::instrument(skip(self))]
    async fn get_user_by_uuid(&self, uuid: &str) -> Result<User, UserInfoError> {
        self.lookup_one(uuid).await
    }

    #[tracing::instrument(skip(self, uuids), fields(count = uuids.len()))]
    async fn get_users_by_uuids(&self, uuids: &[String]) -> Result<Vec<User>, UserInfoError> {
        self.lookup_many(uuids).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_location_by_location_id(
        &self,
        location_id: &str,
    ) -> Result<Location, UserInfoError> {
        self.lookup_one(location_id).await
    }

    #[tracing::instrument(skip(self, location_ids), fields(count = location_ids.len()))]
    async fn get_locations_by_location_ids(
        &self,
        location_ids: &[String],
    ) -> Result<Vec<Location>, UserInfoError> {
        self.lookup_many(location_ids).await
    }

    #[tracing::instrument(skip(self, criteria), fields(offset = criteria.offset, limit = criteria.limit))]
    async fn search_users(&self, criteria: SearchCriteria) -> Result<Vec<User>, UserInfoError> {
        self.search_entities(criteria).await
    }

    #[tracing::instrument(skip(self, criteria), fields(offset = criteria.offset, limit = criteria.limit))]
    async fn search_locations(
        &self,
        criteria: SearchCriteria,
    ) -> Result<Vec<Location>, UserInfoError> {
        self.search_entities(criteria).await
    }

    #[tracing::instrument(skip(self, uuids), fields(count = uuids.len()))]
    async fn get_user_accounts(&self, uuids: &[String]) -> Result<Vec<UserAccount>, UserInfoError> {
        if uuids.is_empty() {
            return Err(UserInfoError::invalid_argument(ERROR_NON_EMPTY_ARRAY));
        }
        let cached = self.accounts.fetch_many::<CachedUserAccount>(uuids).await?;
        Ok(cached.into_iter().map(UserAccount::from).collect())
    }

    #[tracing::instrument(skip(self, location_ids), fields(count = location_ids.len()))]
    async fn get_location_accounts(
        &self,
        location_ids: &[String],
    ) -> Result<Vec<LocationAccount>, UserInfoError> {
        if location_ids.is_empty() {
            return Err(UserInfoError::invalid_argument(ERROR_NON_EMPTY_ARRAY));
        }
        let cached = self
            .accounts
            .fetch_many::<CachedLocationAccount>(location_ids)
            .await?;
        Ok(cached.into_iter().map(LocationAccount::from).collect())
    }
}
