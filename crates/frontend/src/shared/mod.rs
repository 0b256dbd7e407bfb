pub mod api_utils;
pub mod components;
pub mod config;
pub mod form_stepper;
pub mod format;
pub mod icons;
pub mod remote_table;
pub mod title_badge;
