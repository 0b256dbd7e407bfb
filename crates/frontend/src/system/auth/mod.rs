pub mod api;
pub mod context;
pub mod guard;
pub mod permissions;
pub mod storage;
