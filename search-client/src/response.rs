use serde::Deserialize;

/// Body returned by the `_search` endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub hits: Hits<T>,
}

#[derive(Debug, Deserialize)]
pub struct Hits<T> {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default = "Vec::new")]
    pub hits: Vec<Hit<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Hit<T> {
    #[serde(rename = "_source")]
    pub source: T,
}

/// Newer clusters report `{"value": n, "relation": "eq"}`, older ones a bare
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object { value: u64 },
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(value) | TotalHits::Object { value } => *value,
        }
    }
}

impl<T> SearchResponse<T> {
    /// Total number of matching documents. Falls back to the number of hits
    /// returned when the backend omits the total.
    pub fn total(&self) -> u64 {
        self.hits
            .total
            .map(|total| total.value())
            .unwrap_or(self.hits.hits.len() as u64)
    }

    pub fn into_documents(self) -> Vec<T> {
        self.hits.hits.into_iter().map(|hit| hit.source).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Deserialize)]
pub struct ClusterHealth {
    pub status: ClusterStatus,
}

impl ClusterHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status, ClusterStatus::Green | ClusterStatus::Yellow)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn parses_object_total() {
        let response: SearchResponse<Value> = serde_json::from_value(json!({
            "took": 3,
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": [ { "_index": "user", "_id": "1", "_source": { "uuid": "1" } } ]
            }
        }))
        .unwrap();

        assert_eq!(response.total(), 42);
        assert_eq!(response.into_documents(), vec![json!({ "uuid": "1" })]);
    }

    #[test]
    fn parses_numeric_total() {
        let response: SearchResponse<Value> =
            serde_json::from_value(json!({ "hits": { "total": 0, "hits": [] } })).unwrap();

        assert_eq!(response.total(), 0);
        assert!(response.into_documents().is_empty());
    }

    #[test]
    fn missing_total_falls_back_to_hit_count() {
        let response: SearchResponse<Value> = serde_json::from_value(json!({
            "hits": { "hits": [ { "_source": {} }, { "_source": {} } ] }
        }))
        .unwrap();

        assert_eq!(response.total(), 2);
    }

    #[test]
    fn yellow_cluster_is_healthy() {
        let health: ClusterHealth =
            serde_json::from_value(json!({ "cluster_name": "c", "status": "yellow" })).unwrap();
        assert!(health.is_healthy());

        let health: ClusterHealth = serde_json::from_value(json!({ "status": "red" })).unwrap();
        assert!(!health.is_healthy());
    }
}
