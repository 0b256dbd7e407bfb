//! Server-side pagination, sorting and filtering contract shared by every
//! list endpoint (`GET /api/<resource>`).
//!
//! The list API accepts a single sort clause and a single filter clause per
//! request. `ListQuery` carries them in structured form; `ListQueryParams` is
//! the flat query-string shape actually sent over the wire.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SORT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Sort used whenever the user clears the column sort
    pub fn created_at_desc() -> Self {
        Self::desc(DEFAULT_SORT_FIELD)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    #[default]
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Equals => "equals",
            FilterOperator::StartsWith => "startsWith",
            FilterOperator::EndsWith => "endsWith",
            FilterOperator::IsEmpty => "isEmpty",
            FilterOperator::IsNotEmpty => "isNotEmpty",
        }
    }

    /// Operators that ignore the clause value
    pub fn is_unary(&self) -> bool {
        matches!(self, FilterOperator::IsEmpty | FilterOperator::IsNotEmpty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// One page request against an items data source.
///
/// `page` is 1-based. `filters` holds at most one clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<SortSpec>,
    pub filters: Vec<FilterClause>,
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            sort: None,
            filters: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_filter(mut self, filter: FilterClause) -> Self {
        self.filters = vec![filter];
        self
    }

    pub fn to_params(&self) -> ListQueryParams {
        let filter = self.filters.first();
        ListQueryParams {
            page: self.page,
            page_size: self.page_size,
            sort_field: self.sort.as_ref().map(|s| s.field.clone()),
            sort_direction: self.sort.as_ref().map(|s| s.direction),
            filter_field: filter.map(|f| f.field.clone()),
            filter_operator: filter.map(|f| f.operator),
            filter_value: filter
                .filter(|f| !f.operator.is_unary())
                .map(|f| f.value.clone()),
        }
    }
}

/// Flat query-string form of [`ListQuery`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryParams {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_operator: Option<FilterOperator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_items: u64,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub items_per_page: Option<u32>,
}

impl PaginationMeta {
    pub fn total_pages(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_items.div_ceil(page_size as u64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub pagination_meta: PaginationMeta,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination_meta: PaginationMeta::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_carry_single_sort_and_filter() {
        let query = ListQuery::new(2, 50)
            .with_sort(SortSpec::asc("email"))
            .with_filter(FilterClause::new("email", FilterOperator::Contains, "alice"));
        let params = query.to_params();
        assert_eq!(params.page, 2);
        assert_eq!(params.page_size, 50);
        assert_eq!(params.sort_field.as_deref(), Some("email"));
        assert_eq!(params.sort_direction, Some(SortDirection::Asc));
        assert_eq!(params.filter_field.as_deref(), Some("email"));
        assert_eq!(params.filter_operator, Some(FilterOperator::Contains));
        assert_eq!(params.filter_value.as_deref(), Some("alice"));
    }

    #[test]
    fn test_unary_operator_drops_value() {
        let query = ListQuery::new(1, 10)
            .with_filter(FilterClause::new("phone", FilterOperator::IsEmpty, "ignored"));
        let params = query.to_params();
        assert_eq!(params.filter_operator, Some(FilterOperator::IsEmpty));
        assert_eq!(params.filter_value, None);
    }

    #[test]
    fn test_page_is_clamped_to_one_based() {
        let query = ListQuery::new(0, 0);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 1);
    }

    #[test]
    fn test_total_pages() {
        let meta = PaginationMeta {
            total_items: 101,
            ..Default::default()
        };
        assert_eq!(meta.total_pages(50), 3);
        assert_eq!(meta.total_pages(0), 0);
        assert_eq!(PaginationMeta::default().total_pages(50), 0);
    }

    #[test]
    fn test_list_response_wire_shape() {
        let json = r#"{"items":[1,2],"paginationMeta":{"totalItems":2}}"#;
        let response: ListResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(response.items, vec![1, 2]);
        assert_eq!(response.pagination_meta.total_items, 2);
        assert_eq!(response.pagination_meta.current_page, None);
    }

    #[test]
    fn test_operator_wire_names() {
        assert_eq!(
            serde_json::to_string(&FilterOperator::StartsWith).unwrap(),
            "\"startsWith\""
        );
        assert_eq!(FilterOperator::IsNotEmpty.as_str(), "isNotEmpty");
        assert_eq!(serde_json::to_string(&SortDirection::Desc).unwrap(), "\"desc\"");
    }
}
