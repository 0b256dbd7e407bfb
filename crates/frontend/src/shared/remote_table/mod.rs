//! Generic Remote Table: a paginated, sortable, searchable grid over any
//! [`data_source::ItemsDataSource`] with permission-aware row actions.

pub mod columns;
pub mod data_source;
pub mod query_state;
pub mod row_actions;
pub mod search;
pub mod view;

pub use columns::{ColumnDef, TableRow};
pub use data_source::{ItemsDataSource, RestResource};
pub use row_actions::{RowAction, RowPredicate, RowRefresh};
pub use search::{SearchConfig, SearchField};
pub use view::RemoteTable;
