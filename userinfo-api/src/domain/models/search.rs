use search_client::{BoundaryFilter, SortOrder};
use strum::{Display, EnumString};

/// Parsed case-insensitively, so `desc` and `DESC` are the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum SortDirection {
    #[default]
    #[strum(ascii_case_insensitive, serialize = "ASC")]
    Ascending,
    #[strum(ascii_case_insensitive, serialize = "DESC")]
    Descending,
}

impl From<SortDirection> for SortOrder {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => SortOrder::Asc,
            SortDirection::Descending => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// A keyword search over one entity kind.
///
/// `keyword` is validated by the service, not here, so that an empty keyword
/// is reported as an invalid argument rather than silently accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub keyword: String,
    /// Fields to match against; empty means the entity's default set.
    pub fields: Vec<String>,
    pub filters: Vec<BoundaryFilter>,
    pub offset: usize,
    pub limit: usize,
    pub sort: Option<SortSpec>,
}

impl SearchCriteria {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            fields: Vec::new(),
            filters: Vec::new(),
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
            sort: None,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filters(mut self, filters: impl IntoIterator<Item = BoundaryFilter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn with_page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }
}
