pub mod auth;
pub mod favorites;
pub mod restaurants;
pub mod stats;
