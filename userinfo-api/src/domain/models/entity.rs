use serde::de::DeserializeOwned;
use strum::Display;

/// Logical search index. The physical index name is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum SearchIndex {
    #[strum(serialize = "user")]
    Users,
    #[strum(serialize = "location")]
    Locations,
}

/// A record type stored in one of the search indices.
pub trait SearchEntity: DeserializeOwned + Send + 'static {
    /// Used in "not found" messages.
    const KIND: &'static str;
    const INDEX: SearchIndex;
    /// Field holding the unique identifier.
    const ID_FIELD: &'static str;
    /// Fields matched by a keyword search when the caller names none.
    const DEFAULT_FIELDS: &'static [&'static str];
}
