pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod spaces;
pub mod state;
pub mod theme;
