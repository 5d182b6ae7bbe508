//! Database connection utilities.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// SQLite pragmas applied to file-backed databases.
///
/// WAL lets dashboard readers keep reading while a sync holds the write
/// transaction; the busy timeout covers the short window where the WAL is
/// checkpointed.
const SQLITE_PRAGMAS: [&str; 3] = [
    "PRAGMA journal_mode=WAL",
    "PRAGMA busy_timeout=5000",
    "PRAGMA synchronous=NORMAL",
];

async fn configure_sqlite(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    for pragma in SQLITE_PRAGMAS {
        db.execute(Statement::from_string(backend, pragma.to_string()))
            .await?;
    }
    Ok(())
}

async fn open(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;

    if database_url.starts_with("sqlite://") {
        configure_sqlite(&db).await?;
    }

    Ok(db)
}

/// Establish a connection to the cache database.
///
/// # Arguments
/// * `database_url` - Database connection string (e.g., `sqlite:///path/to/trawler.db?mode=rwc`
///   or `postgres:///trawler`)
///
/// # Errors
/// Returns `DbErr` if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    open(database_url).await
}

/// Establish a connection and bring the schema up to date.
///
/// # Example
/// ```ignore
/// let db = trawler::connect_and_migrate("sqlite::memory:").await?;
/// ```
#[cfg(feature = "migrate")]
pub async fn connect_and_migrate(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    use sea_orm_migration::MigratorTrait;

    let db = open(database_url).await?;
    crate::migration::Migrator::up(&db, None).await?;
    Ok(db)
}
