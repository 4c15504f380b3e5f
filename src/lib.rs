pub mod chair;
pub mod config;
pub mod extract;
pub mod filters;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

pub use config::{Config, ConfigError};
pub use routes::create_app;
pub use state::{AppState, ChairContext};
pub use store::{ChairStore, MemoryStore, PgStore};
