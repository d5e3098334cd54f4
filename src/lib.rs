pub mod clock;
pub mod db;
pub mod error;
pub mod handler;
pub mod record;
pub mod routes;
pub mod schema;
pub mod scoring;
pub mod settings;
pub mod store;
pub mod utils;
