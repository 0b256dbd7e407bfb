pub mod confirm_dialog;
pub mod pagination_controls;
pub mod search_input;
pub mod table;
