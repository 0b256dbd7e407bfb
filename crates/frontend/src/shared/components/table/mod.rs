pub mod sortable_header_cell;
