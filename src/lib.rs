pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use app::{App, AppState};
pub use config::Config;
pub use db::Database;
pub use error::BackendError;
