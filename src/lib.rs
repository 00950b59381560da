// Library for tests to access modules

pub mod collector;
pub mod config;
pub mod models;
pub mod printer;
pub mod prom_repo;
pub mod reconciler;
pub mod render;
pub mod target_directory;
pub mod version;
