#![forbid(unsafe_code)]

mod builder;
mod config;
mod error;
mod events;
mod instances;
mod references;
mod requests;
mod steps;
mod support;
mod templates;
mod types;

pub use builder::TemplateBuilder;
pub use config::StoreConfig;
pub use error::{ErrorKind, StoreError};
pub use requests::*;
pub use types::*;

pub use chk_core::{Rollup, Status};

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use support::*;

/// SQLite-backed checklist store.
///
/// Every mutating operation runs in a single `BEGIN IMMEDIATE` transaction,
/// which takes the database write lock before the first read. Writers on
/// other connections (threads or processes sharing the same file) wait up
/// to the configured busy timeout, so read-then-write sequences such as
/// reordering or get-or-create never interleave.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: Option<PathBuf>,
    config: StoreConfig,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with(StoreConfig::for_dir(storage_dir))
    }

    pub fn open_with(config: StoreConfig) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&config.storage_dir)?;

        let db_path = config.db_path();
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(config.busy_timeout())?;
        let _journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        let storage_dir = Some(config.storage_dir.clone());
        let store = Self::from_connection(conn, storage_dir, config)?;
        tracing::debug!(path = %db_path.display(), "checklist store opened");
        Ok(store)
    }

    /// A private database that disappears when the store is dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, None, StoreConfig::default())
    }

    fn from_connection(
        conn: Connection,
        storage_dir: Option<PathBuf>,
        config: StoreConfig,
    ) -> Result<Self, StoreError> {
        conn.busy_timeout(config.busy_timeout())?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        install_schema(&conn, &config.modifier)?;

        Ok(Self {
            conn,
            storage_dir,
            config,
        })
    }

    pub fn storage_dir(&self) -> Option<&Path> {
        self.storage_dir.as_deref()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Snapshot transaction for multi-statement reads. Never written through,
    /// so dropping it (rollback) is the normal way to end it.
    fn read_tx(&self) -> Result<Transaction<'_>, StoreError> {
        Ok(self.conn.unchecked_transaction()?)
    }
}

fn begin_write(conn: &mut Connection) -> Result<Transaction<'_>, StoreError> {
    Ok(conn.transaction_with_behavior(TransactionBehavior::Immediate)?)
}
