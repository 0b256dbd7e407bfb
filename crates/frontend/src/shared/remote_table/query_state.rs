//! Pagination / sort / filter state of a remote table and the coordinator
//! deciding which page requests actually go out.

use contracts::shared::list_query::{FilterClause, ListQuery, SortDirection, SortSpec};

/// UI-side query state. `page` is zero-based here and converted on the way out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQueryState {
    pub page: usize,
    pub page_size: usize,
    pub sort: Option<SortSpec>,
    pub filter: Option<FilterClause>,
}

impl TableQueryState {
    pub fn new(page_size: usize, sort: Option<SortSpec>, filter: Option<FilterClause>) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            sort,
            filter,
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changing the page size returns to the first page
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page = 0;
        }
    }

    /// Header click cycle: asc -> desc -> cleared, another column starts at asc
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort = match self.sort.take() {
            Some(current) if current.field == field => match current.direction {
                SortDirection::Asc => Some(SortSpec::desc(field)),
                SortDirection::Desc => None,
            },
            _ => Some(SortSpec::asc(field)),
        };
    }

    /// A different filter returns to the first page
    pub fn set_filter(&mut self, filter: Option<FilterClause>) {
        if filter != self.filter {
            self.filter = filter;
            self.page = 0;
        }
    }

    /// Sort sent to the data source, `createdAt desc` when none is selected
    pub fn resolved_sort(&self) -> SortSpec {
        self.sort.clone().unwrap_or_else(SortSpec::created_at_desc)
    }

    pub fn to_list_query(&self) -> ListQuery {
        ListQuery {
            page: self.page as u32 + 1,
            page_size: self.page_size as u32,
            sort: Some(self.resolved_sort()),
            filters: self.filter.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: ListQuery,
}

/// Issues at most one request per distinct query and tags every request
/// with a sequence number. Only the newest request's response is applied.
#[derive(Debug, Default)]
pub struct FetchCoordinator {
    last_issued: Option<ListQuery>,
    seq: u64,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when the query equals the last issued one
    pub fn request(&mut self, query: ListQuery) -> Option<FetchTicket> {
        if self.last_issued.as_ref() == Some(&query) {
            return None;
        }
        Some(self.issue(query))
    }

    /// Re-issue regardless of the last query (refresh / revalidate)
    pub fn force(&mut self, query: ListQuery) -> FetchTicket {
        self.issue(query)
    }

    fn issue(&mut self, query: ListQuery) -> FetchTicket {
        self.seq += 1;
        self.last_issued = Some(query.clone());
        FetchTicket {
            seq: self.seq,
            query,
        }
    }

    /// Whether a completed request is still the newest one
    pub fn accepts(&self, ticket_seq: u64) -> bool {
        ticket_seq == self.seq
    }

    pub fn issued_count(&self) -> u64 {
        self.seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::list_query::FilterOperator;

    fn email_filter(value: &str) -> Option<FilterClause> {
        Some(FilterClause::new("email", FilterOperator::Contains, value))
    }

    #[test]
    fn test_initial_query_defaults_sort() {
        let state = TableQueryState::new(50, None, None);
        let mut coordinator = FetchCoordinator::new();

        let ticket = coordinator.request(state.to_list_query()).unwrap();
        assert_eq!(ticket.query.page, 1);
        assert_eq!(ticket.query.page_size, 50);
        assert_eq!(ticket.query.sort, Some(SortSpec::created_at_desc()));
        assert!(ticket.query.filters.is_empty());
        assert_eq!(coordinator.issued_count(), 1);

        // Re-render with identical state does not fetch again
        assert!(coordinator.request(state.to_list_query()).is_none());
        assert_eq!(coordinator.issued_count(), 1);
    }

    #[test]
    fn test_one_fetch_per_distinct_combination() {
        let mut state = TableQueryState::new(25, None, None);
        let mut coordinator = FetchCoordinator::new();
        let mut issued = Vec::new();

        let mut step = |state: &TableQueryState, coordinator: &mut FetchCoordinator| {
            if let Some(t) = coordinator.request(state.to_list_query()) {
                issued.push(t.query);
            }
        };

        step(&state, &mut coordinator);
        state.set_page(2);
        step(&state, &mut coordinator);
        state.set_page(2);
        step(&state, &mut coordinator);
        state.toggle_sort("price");
        step(&state, &mut coordinator);
        state.set_filter(email_filter("bob"));
        step(&state, &mut coordinator);
        state.set_filter(email_filter("bob"));
        step(&state, &mut coordinator);

        assert_eq!(issued.len(), 4);
        assert_eq!(issued[1].page, 3);
        assert_eq!(issued[2].sort, Some(SortSpec::asc("price")));
        // filter change resets to the first page
        assert_eq!(issued[3].page, 1);
        assert!(issued.iter().all(|q| q.filters.len() <= 1 && q.sort.is_some()));
    }

    #[test]
    fn test_sort_cycle_and_reset() {
        let mut state = TableQueryState::new(10, None, None);
        state.toggle_sort("title");
        assert_eq!(state.sort, Some(SortSpec::asc("title")));
        state.toggle_sort("title");
        assert_eq!(state.sort, Some(SortSpec::desc("title")));
        state.toggle_sort("title");
        assert_eq!(state.sort, None);
        assert_eq!(state.to_list_query().sort, Some(SortSpec::created_at_desc()));

        state.toggle_sort("title");
        state.toggle_sort("price");
        assert_eq!(state.sort, Some(SortSpec::asc("price")));
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut state = TableQueryState::new(10, None, None);
        state.set_page(4);
        state.set_page_size(10);
        assert_eq!(state.page, 4);
        state.set_page_size(100);
        assert_eq!(state.page, 0);
        state.set_page_size(0);
        assert_eq!(state.page_size, 1);
    }

    #[test]
    fn test_initial_filter_is_sent() {
        let state = TableQueryState::new(10, Some(SortSpec::asc("id")), email_filter("x"));
        let query = state.to_list_query();
        assert_eq!(query.sort, Some(SortSpec::asc("id")));
        assert_eq!(query.filters, email_filter("x").into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_stale_response_is_rejected() {
        let mut coordinator = FetchCoordinator::new();
        let first = coordinator.request(ListQuery::new(1, 10)).unwrap();
        let second = coordinator.request(ListQuery::new(2, 10)).unwrap();
        assert!(!coordinator.accepts(first.seq));
        assert!(coordinator.accepts(second.seq));
    }

    #[test]
    fn test_force_reissues_same_query() {
        let mut coordinator = FetchCoordinator::new();
        let query = ListQuery::new(1, 10);
        let first = coordinator.request(query.clone()).unwrap();
        let forced = coordinator.force(query.clone());
        assert_eq!(forced.query, first.query);
        assert!(forced.seq > first.seq);
        assert!(coordinator.request(query).is_none());
    }
}
