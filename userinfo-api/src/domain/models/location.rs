use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use super::{SearchEntity, SearchIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    All,
    #[serde(rename = "LOC")]
    Location,
    #[serde(rename = "LGL")]
    LegalEntity,
    #[serde(rename = "ULT")]
    UltimateParent,
}

/// A location document from the `location` index.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: Option<String>,
    #[serde(rename = "type")]
    pub location_type: Option<LocationType>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub nearest_legal_entity_id: Option<String>,
    pub ultimate_parent_id: Option<String>,
    #[serde(default)]
    pub is_internal: bool,
}

impl SearchEntity for Location {
    const KIND: &'static str = "location";
    const INDEX: SearchIndex = SearchIndex::Locations;
    const ID_FIELD: &'static str = "locationId";
    const DEFAULT_FIELDS: &'static [&'static str] =
        &["name", "address", "city", "country", "locationId"];
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn location_type_uses_short_codes() {
        let location: Location = serde_json::from_value(json!({
            "locationId": "L1",
            "type": "LGL",
            "name": "HQ"
        }))
        .unwrap();

        assert_eq!(location.location_type, Some(LocationType::LegalEntity));
        assert_eq!(
            serde_json::to_value(&location).unwrap(),
            json!({ "locationId": "L1", "type": "LGL", "name": "HQ", "isInternal": false })
        );
    }
}
