mod database;
mod state_builder;

pub use database::connect_and_migrate;
pub use state_builder::{ApiServices, build_memory_services, build_postgres_services};
