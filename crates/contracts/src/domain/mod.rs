pub mod a001_user;
pub mod a002_property;
pub mod a003_agent_application;
