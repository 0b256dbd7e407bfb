pub mod list_query;
pub mod permission;
pub mod wizard_draft;
