//! Mapping from the compact cache-native account shapes to the public ones.
//!
//! The typed `From` conversions do the actual work. The rename tables are the
//! declared contract, and [`verify_rename_tables`] checks at startup that the
//! serde shapes of both sides agree with them.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::models::{CachedLocationAccount, CachedUserAccount, LocationAccount, UserAccount};

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("rename table `{table}` maps more than one key to `{key}`")]
    NotBijective { table: &'static str, key: String },
    #[error("rename table `{table}` does not cover {side} keys {keys:?}")]
    Uncovered {
        table: &'static str,
        side: &'static str,
        keys: Vec<String>,
    },
    #[error("rename table `{table}` names {side} keys missing from the record: {keys:?}")]
    Unknown {
        table: &'static str,
        side: &'static str,
        keys: Vec<String>,
    },
    #[error("rename table `{table}` does not carry values through unchanged")]
    ValueMismatch { table: &'static str },
    #[error("failed to serialize sample record: {0}")]
    Sample(#[from] serde_json::Error),
}

/// `(compact, public)` key pairs for one cache partition.
#[derive(Debug, Clone, Copy)]
pub struct RenameTable {
    pub name: &'static str,
    pub pairs: &'static [(&'static str, &'static str)],
}

pub const USER_ACCOUNT_RENAMES: RenameTable = RenameTable {
    name: "user-accounts",
    pairs: &[
        ("Id", "uuid"),
        ("AccId", "locationAccountId"),
        ("NleId", "nearestLegalEntityId"),
        ("UpId", "ultimateParentId"),
        ("IsInternal", "isInternal"),
        ("fn", "firstName"),
        ("sn", "lastName"),
        ("mail", "email"),
        ("jr", "jobRole"),
        ("an", "accountName"),
    ],
};

pub const LOCATION_ACCOUNT_RENAMES: RenameTable = RenameTable {
    name: "location-accounts",
    pairs: &[
        ("AccId", "locationAccountId"),
        ("nleId", "nearestLegalEntityId"),
        ("upId", "ultimateParentId"),
        ("isInternal", "isInternal"),
    ],
};

impl RenameTable {
    pub fn to_compact(&self, public: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(_, p)| *p == public)
            .map(|(c, _)| *c)
    }

    /// Rewrites the keys of a public JSON object back to compact names.
    /// Keys the table does not know are dropped.
    pub fn rename_to_compact(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .filter_map(|(k, v)| self.to_compact(&k).map(|c| (c.to_string(), v)))
                    .collect::<Map<_, _>>(),
            ),
            other => other,
        }
    }

    fn check_bijective(&self) -> Result<(), ProjectionError> {
        let mut compact = BTreeSet::new();
        let mut public = BTreeSet::new();
        for (c, p) in self.pairs {
            if !compact.insert(*c) {
                return Err(ProjectionError::NotBijective {
                    table: self.name,
                    key: c.to_string(),
                });
            }
            if !public.insert(*p) {
                return Err(ProjectionError::NotBijective {
                    table: self.name,
                    key: p.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_side<'a>(
        &self,
        side: &'static str,
        declared: impl Iterator<Item = &'a str>,
        sample: &Value,
    ) -> Result<(), ProjectionError> {
        let declared: BTreeSet<&str> = declared.collect();
        let actual: BTreeSet<&str> = match sample {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => BTreeSet::new(),
        };

        let uncovered: Vec<String> = actual
            .difference(&declared)
            .map(|k| k.to_string())
            .collect();
        if !uncovered.is_empty() {
            return Err(ProjectionError::Uncovered {
                table: self.name,
                side,
                keys: uncovered,
            });
        }

        let unknown: Vec<String> = declared
            .difference(&actual)
            .map(|k| k.to_string())
            .collect();
        if !unknown.is_empty() {
            return Err(ProjectionError::Unknown {
                table: self.name,
                side,
                keys: unknown,
            });
        }

        Ok(())
    }

    /// Checks the table against fully populated samples of both shapes: the
    /// key sets must match exactly and renaming the public sample back must
    /// give the compact one.
    pub fn verify(
        &self,
        compact_sample: &impl Serialize,
        public_sample: &impl Serialize,
    ) -> Result<(), ProjectionError> {
        let compact = serde_json::to_value(compact_sample)?;
        let public = serde_json::to_value(public_sample)?;

        self.check_bijective()?;
        self.check_side("compact", self.pairs.iter().map(|(c, _)| *c), &compact)?;
        self.check_side("public", self.pairs.iter().map(|(_, p)| *p), &public)?;

        if self.rename_to_compact(public) != compact {
            return Err(ProjectionError::ValueMismatch { table: self.name });
        }
        Ok(())
    }
}

fn sample_user_account() -> CachedUserAccount {
    let some = |s: &str| Some(s.to_string());
    CachedUserAccount {
        uuid: some("uuid"),
        location_account_id: some("acc"),
        nearest_legal_entity_id: some("nle"),
        ultimate_parent_id: some("up"),
        is_internal: true,
        first_name: some("first"),
        last_name: some("last"),
        email: some("mail"),
        job_role: some("role"),
        account_name: some("name"),
    }
}

fn sample_location_account() -> CachedLocationAccount {
    let some = |s: &str| Some(s.to_string());
    CachedLocationAccount {
        location_account_id: some("acc"),
        nearest_legal_entity_id: some("nle"),
        ultimate_parent_id: some("up"),
        is_internal: some("true"),
    }
}

/// Fails if either rename table disagrees with the record schemas.
pub fn verify_rename_tables() -> Result<(), ProjectionError> {
    let user = sample_user_account();
    USER_ACCOUNT_RENAMES.verify(&user, &UserAccount::from(user.clone()))?;

    let location = sample_location_account();
    LOCATION_ACCOUNT_RENAMES.verify(&location, &LocationAccount::from(location.clone()))?;

    Ok(())
}

impl From<CachedUserAccount> for UserAccount {
    fn from(cached: CachedUserAccount) -> Self {
        Self {
            uuid: cached.uuid,
            location_account_id: cached.location_account_id,
            nearest_legal_entity_id: cached.nearest_legal_entity_id,
            ultimate_parent_id: cached.ultimate_parent_id,
            is_internal: cached.is_internal,
            first_name: cached.first_name,
            last_name: cached.last_name,
            email: cached.email,
            job_role: cached.job_role,
            account_name: cached.account_name,
        }
    }
}

impl From<CachedLocationAccount> for LocationAccount {
    fn from(cached: CachedLocationAccount) -> Self {
        Self {
            location_account_id: cached.location_account_id,
            nearest_legal_entity_id: cached.nearest_legal_entity_id,
            ultimate_parent_id: cached.ultimate_parent_id,
            is_internal: cached.is_internal,
        }
    }
}
