//! SQLite connection pools, split by access mode.
//!
//! SQLite serializes writers, so handing a busy write to a shared pool just
//! queues it behind readers. `DatabasePool` keeps a single-connection writer
//! pool for mutations and a wider read-only pool for queries. Both run in
//! WAL mode with foreign keys on, so readers never block the writer.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

const MAX_READ_CONNECTIONS: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Paired read/write pools over one SQLite database file.
#[derive(Clone)]
pub struct DatabasePool {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DatabasePool {
    /// Open the database, run pending migrations, and build both pools.
    ///
    /// The database file is created if missing. Migrations run on the
    /// writer connection before the reader pool opens, so readers never
    /// see a half-migrated schema.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .create_if_missing(true);

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts.clone())
            .await?;

        sqlx::migrate!("../../migrations").run(&writer).await?;

        let reader = SqlitePoolOptions::new()
            .max_connections(MAX_READ_CONNECTIONS)
            .connect_with(opts.read_only(true))
            .await?;

        Ok(Self { reader, writer })
    }
}
