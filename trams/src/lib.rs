pub mod app;
pub mod config;
pub mod runtime;
pub mod scenario;
pub mod store;
