//! Database module: the SQLite access layer attached to the application.
//!
//! No schema is defined here. The pool is built lazily so attaching it to
//! the application neither opens nor creates the database file.

pub mod sqlite;

pub use sqlite::{Database, SqlitePool};
