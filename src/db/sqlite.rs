use crate::error::BackendError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::{debug, info};

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone, Debug)]
pub struct Database {
    url: String,
    pool: SqlitePool,
}

impl Database {
    /// Bind a lazily connected pool to `url`.
    ///
    /// Only the locator is parsed here; the file is opened (and created if
    /// missing) on first use. The pool's maintenance tasks need a tokio
    /// runtime, so attaching outside one is an error.
    pub fn attach(url: impl Into<String>) -> Result<Self, BackendError> {
        let url = url.into();
        if tokio::runtime::Handle::try_current().is_err() {
            return Err(BackendError::MissingRuntime);
        }
        let connect_opts = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_lazy_with(connect_opts);
        debug!(database_url = %url, "database layer attached");
        Ok(Self { url, pool })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trip a trivial query, opening the file if nothing has yet.
    pub async fn ping(&self) -> Result<(), BackendError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        if !self.pool.is_closed() {
            self.pool.close().await;
            info!(database_url = %self.url, "database pool closed");
        }
    }
}
