//! Request body types for the `_search` endpoint and a builder for the
//! "match every term across fields, narrowed by exact facets" query.

use serde::{
    ser::{SerializeMap, Serializer},
    Deserialize, Serialize,
};

use crate::QueryString;

/// Suffix of the non-analyzed sub-field used for exact matching and sorting.
pub const EXACT_MATCH_SUFFIX: &str = ".keyword";

pub fn exact_field(field: &str) -> String {
    format!("{field}{EXACT_MATCH_SUFFIX}")
}

/// Complete body of a `_search` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub from: usize,
    pub size: usize,
    pub query: QueryClause,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortClause>,
}

impl SearchQuery {
    /// Exact lookup of documents whose `id_field` is one of `ids`.
    pub fn terms_lookup<I, S>(id_field: &str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = ids.into_iter().map(Into::into).collect::<Vec<String>>();
        let size = values.len();

        Self {
            from: 0,
            size,
            query: QueryClause::Bool(BoolQuery {
                must: vec![QueryClause::Terms(TermsQuery::exact(id_field, values))],
            }),
            sort: Vec::new(),
        }
    }

    /// Clauses of the top level `bool.must`, or the query itself when it is
    /// not a boolean container.
    pub fn must_clauses(&self) -> &[QueryClause] {
        match &self.query {
            QueryClause::Bool(bool_query) => &bool_query.must,
            other => std::slice::from_ref(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryClause {
    Bool(BoolQuery),
    QueryString(QueryStringQuery),
    Terms(TermsQuery),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolQuery {
    pub must: Vec<QueryClause>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextQueryType {
    BestFields,
    CrossFields,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryStringQuery {
    pub fields: Vec<String>,
    #[serde(rename = "type")]
    pub kind: TextQueryType,
    pub query: String,
}

/// `{"terms": {"<field>": [values...]}}`
#[derive(Debug, Clone, PartialEq)]
pub struct TermsQuery {
    pub field: String,
    pub values: Vec<String>,
}

impl TermsQuery {
    /// Terms query against the exact-match sub-field of `field`.
    pub fn exact(field: &str, values: Vec<String>) -> Self {
        Self {
            field: exact_field(field),
            values,
        }
    }
}

impl Serialize for TermsQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.values)?;
        map.end()
    }
}

/// A facet restriction supplied by the caller: `field_name` must equal one of
/// `values` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryFilter {
    pub field_name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// `{"<field>": {"order": "asc"}}`
#[derive(Debug, Clone, PartialEq)]
pub struct SortClause {
    pub field: String,
    pub order: SortOrder,
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Order {
            order: SortOrder,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &Order { order: self.order })?;
        map.end()
    }
}

/// Builds a cross-fields text query, ANDed with one terms clause per
/// [`BoundaryFilter`] and optionally sorted on a single field.
///
/// ```
/// use search_client::{QueryString, SearchQueryBuilder, SortOrder};
///
/// let query = SearchQueryBuilder::new(["firstname", "lastname"], QueryString::from_keyword("ann"))
///     .page(0, 10)
///     .sort_by("lastname", SortOrder::Desc)
///     .build();
///
/// assert_eq!(query.size, 10);
/// assert_eq!(query.sort[0].field, "lastname.keyword");
/// ```
#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    fields: Vec<String>,
    query_string: QueryString,
    from: usize,
    size: usize,
    filters: Vec<BoundaryFilter>,
    sort: Option<SortClause>,
}

impl SearchQueryBuilder {
    pub const DEFAULT_SIZE: usize = 10;

    pub fn new<I, S>(fields: I, query_string: QueryString) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            query_string,
            from: 0,
            size: Self::DEFAULT_SIZE,
            filters: Vec::new(),
            sort: None,
        }
    }

    pub fn page(mut self, offset: usize, limit: usize) -> Self {
        self.from = offset;
        self.size = limit;
        self
    }

    pub fn filter(mut self, filter: BoundaryFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = BoundaryFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    /// Replaces any previously requested sort; only one sort clause is sent.
    pub fn sort_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort = Some(SortClause {
            field: exact_field(field),
            order,
        });
        self
    }

    pub fn build(self) -> SearchQuery {
        let mut must = Vec::with_capacity(1 + self.filters.len());
        must.push(QueryClause::QueryString(QueryStringQuery {
            fields: self.fields,
            kind: TextQueryType::CrossFields,
            query: self.query_string.into_inner(),
        }));
        must.extend(
            self.filters
                .into_iter()
                .map(|filter| QueryClause::Terms(TermsQuery::exact(&filter.field_name, filter.values))),
        );

        SearchQuery {
            from: self.from,
            size: self.size,
            query: QueryClause::Bool(BoolQuery { must }),
            sort: self.sort.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn filter(field: &str, values: &[&str]) -> BoundaryFilter {
        BoundaryFilter {
            field_name: field.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn builds_cross_fields_query_without_filters() {
        let query = SearchQueryBuilder::new(["firstname", "email"], QueryString::from_keyword("ann"))
            .page(20, 5)
            .build();

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "from": 20,
                "size": 5,
                "query": {
                    "bool": {
                        "must": [
                            {
                                "query_string": {
                                    "fields": ["firstname", "email"],
                                    "type": "cross_fields",
                                    "query": "(*ann*)"
                                }
                            }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn each_filter_becomes_its_own_exact_terms_clause() {
        let query = SearchQueryBuilder::new(["name"], QueryString::from_keyword("oslo"))
            .filters([
                filter("ultimateParentId", &["u1", "u2"]),
                filter("nearestLegalEntityId", &["n1"]),
            ])
            .build();

        let body = serde_json::to_value(&query).unwrap();
        let must = body["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 3);
        assert_eq!(must[1], json!({ "terms": { "ultimateParentId.keyword": ["u1", "u2"] } }));
        assert_eq!(must[2], json!({ "terms": { "nearestLegalEntityId.keyword": ["n1"] } }));
    }

    #[test]
    fn sort_defaults_to_ascending_on_exact_field() {
        let query = SearchQueryBuilder::new(["lastname"], QueryString::from_keyword("x"))
            .sort_by("lastname", SortOrder::default())
            .build();

        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body["sort"], json!([{ "lastname.keyword": { "order": "asc" } }]));
    }

    #[test]
    fn only_the_last_sort_is_kept() {
        let query = SearchQueryBuilder::new(["lastname"], QueryString::from_keyword("x"))
            .sort_by("lastname", SortOrder::Asc)
            .sort_by("email", SortOrder::Desc)
            .build();

        assert_eq!(
            query.sort,
            vec![SortClause {
                field: "email.keyword".to_string(),
                order: SortOrder::Desc
            }]
        );
    }

    #[test]
    fn sort_is_omitted_when_not_requested() {
        let query = SearchQueryBuilder::new(["lastname"], QueryString::from_keyword("x")).build();
        let body = serde_json::to_value(&query).unwrap();
        assert!(body.get("sort").is_none());
        assert_eq!(body["size"], json!(SearchQueryBuilder::DEFAULT_SIZE));
    }

    #[test]
    fn terms_lookup_sizes_page_to_the_id_count() {
        let query = SearchQuery::terms_lookup("uuid", ["a", "b", "c"]);

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "from": 0,
                "size": 3,
                "query": { "bool": { "must": [ { "terms": { "uuid.keyword": ["a", "b", "c"] } } ] } }
            })
        );
        assert_eq!(query.must_clauses().len(), 1);
    }

    #[test]
    fn boundary_filter_reads_camel_case() {
        let parsed: BoundaryFilter =
            serde_json::from_value(json!({ "fieldName": "city", "values": ["Oslo"] })).unwrap();
        assert_eq!(parsed, filter("city", &["Oslo"]));
    }
}
