pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod store;
pub mod utils;
pub mod zones;

use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use store::ZoneStore;

#[derive(Clone)]
pub struct AppState {
    pub zones: Arc<dyn ZoneStore>,
    pub config: Config,
}
