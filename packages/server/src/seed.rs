use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{advocate, bid};

/// Default advocate directory seeded on first startup.
const DEFAULT_ADVOCATES: &[(&str, &str, &str)] = &[
    ("Ayesha Khan", "Family Law", "ayesha.khan@ewakeel.example"),
    ("Bilal Ahmed", "Criminal Law", "bilal.ahmed@ewakeel.example"),
    ("Sana Malik", "Property Law", "sana.malik@ewakeel.example"),
    ("Omar Farooq", "Corporate Law", "omar.farooq@ewakeel.example"),
];

/// Seed the `advocate` directory with defaults when the table is empty.
pub async fn seed_advocates(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = advocate::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(());
    }

    let models = DEFAULT_ADVOCATES
        .iter()
        .map(|&(name, specialty, contact)| advocate::ActiveModel {
            name: Set(name.to_string()),
            specialty: Set(Some(specialty.to_string())),
            contact_info: Set(Some(contact.to_string())),
            ..Default::default()
        });

    advocate::Entity::insert_many(models)
        .exec_without_returning(db)
        .await?;

    info!("Seeded {} default advocates", DEFAULT_ADVOCATES.len());
    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for bid listing and acceptance:
    // SELECT * FROM bid WHERE query_id = ? AND status = ?
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_bid_query_status")
        .table(bid::Entity)
        .col(bid::Column::QueryId)
        .col(bid::Column::Status)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_bid_query_status exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_bid_query_status: {}", e);
        }
    }

    Ok(())
}
