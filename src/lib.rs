pub mod config;
pub mod core;
pub mod dashboard;
pub mod notify;
pub mod storage;
