pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod navigation;
pub mod server;
