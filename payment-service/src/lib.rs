pub mod api;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;
