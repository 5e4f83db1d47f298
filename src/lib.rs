pub mod ai;
pub mod app;
pub mod config;
pub mod session;
