//! The application instance and its extension registration steps.
//!
//! `App` is built once in `main`, receives its database and CORS extensions
//! explicitly, and is then turned into an axum `Router`. Nothing is held in
//! global state.

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{
    BackendError, config::Config, db::Database, handlers::fallback, middleware::cors,
};

/// Shared, read-only state handed to handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub debug: bool,
}

pub struct App {
    config: Config,
    database: Option<Database>,
    cors: Option<CorsLayer>,
}

impl App {
    /// A bare application: configuration only, no extensions.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            database: None,
            cors: None,
        }
    }

    /// Construct, then attach the database and the permissive CORS policy.
    pub fn bootstrap(config: Config) -> Result<Self, BackendError> {
        let mut app = Self::new(config);
        app.init_database()?;
        app.init_cors()?;
        Ok(app)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    pub fn has_cors(&self) -> bool {
        self.cors.is_some()
    }

    /// Attach a database layer bound to the configured locator.
    pub fn init_database(&mut self) -> Result<&mut Self, BackendError> {
        let db = Database::attach(self.config.database_url.clone())?;
        self.with_database(db)
    }

    pub fn with_database(&mut self, db: Database) -> Result<&mut Self, BackendError> {
        if self.database.is_some() {
            return Err(BackendError::ExtensionAlreadyRegistered("database"));
        }
        info!(database_url = %db.url(), "registered database extension");
        self.database = Some(db);
        Ok(self)
    }

    /// Attach the permissive CORS policy.
    pub fn init_cors(&mut self) -> Result<&mut Self, BackendError> {
        self.with_cors(cors::permissive())
    }

    pub fn with_cors(&mut self, layer: CorsLayer) -> Result<&mut Self, BackendError> {
        if self.cors.is_some() {
            return Err(BackendError::ExtensionAlreadyRegistered("cors"));
        }
        info!("registered cors extension");
        self.cors = Some(layer);
        Ok(self)
    }

    /// Build the router. Requires the database extension; CORS is optional.
    pub fn router(&self) -> Result<Router, BackendError> {
        let db = self
            .database
            .clone()
            .ok_or(BackendError::MissingExtension("database"))?;
        let state = AppState {
            db,
            debug: self.config.debug,
        };

        let router = Router::new()
            .fallback(fallback::not_found)
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Ok(match self.cors.clone() {
            Some(layer) => router.layer(layer),
            None => {
                warn!("building router without cors extension");
                router
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn bootstrap_attaches_both_extensions() {
        let app = App::bootstrap(config()).expect("bootstrap failed");
        assert_eq!(app.database().map(Database::url), Some("sqlite::memory:"));
        assert!(app.has_cors());
        assert!(app.router().is_ok());
    }

    #[tokio::test]
    async fn new_app_has_no_extensions() {
        let app = App::new(config());
        assert!(app.database().is_none());
        assert!(!app.has_cors());
    }

    #[tokio::test]
    async fn second_database_registration_fails() {
        let mut app = App::bootstrap(config()).expect("bootstrap failed");
        let err = app.init_database().err().expect("expected an error");
        assert!(matches!(
            err,
            BackendError::ExtensionAlreadyRegistered("database")
        ));
    }

    #[tokio::test]
    async fn second_cors_registration_fails() {
        let mut app = App::bootstrap(config()).expect("bootstrap failed");
        let err = app.init_cors().err().expect("expected an error");
        assert!(matches!(err, BackendError::ExtensionAlreadyRegistered("cors")));
    }

    #[test]
    fn bootstrap_outside_runtime_returns_error() {
        let err = App::bootstrap(Config::default())
            .err()
            .expect("expected an error");
        assert!(matches!(err, BackendError::MissingRuntime));
    }

    #[test]
    fn router_requires_database() {
        let mut app = App::new(config());
        app.init_cors().expect("cors registration failed");
        let err = app.router().err().expect("expected an error");
        assert!(matches!(err, BackendError::MissingExtension("database")));
    }
}
