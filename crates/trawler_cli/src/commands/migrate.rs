use trawler::db;
use trawler::migration::{Migrator, MigratorTrait};

use crate::MigrateAction;

pub(crate) async fn handle_migrate(
    action: MigrateAction,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = db::connect(database_url).await?;

    match action {
        MigrateAction::Up => {
            let pending = Migrator::get_pending_migrations(&db).await?;
            if pending.is_empty() {
                println!("Cache schema is up to date.");
                return Ok(());
            }
            for migration in &pending {
                println!("Applying {}", migration.name());
            }
            Migrator::up(&db, None).await?;
            println!("Applied {} migration(s).", pending.len());
        }
        MigrateAction::Down => {
            Migrator::down(&db, Some(1)).await?;
            println!("Rolled back the last migration.");
        }
        MigrateAction::Status => {
            Migrator::status(&db).await?;
            let pending = Migrator::get_pending_migrations(&db).await?.len();
            println!("{pending} pending migration(s).");
        }
        MigrateAction::Fresh => {
            println!("Dropping the cache and recreating its schema...");
            Migrator::fresh(&db).await?;
            println!("Done.");
        }
    }

    Ok(())
}
