use sea_orm::*;
use sea_query::{Index, PostgresQueryBuilder};
use tracing::info;

use crate::entity::avatar;

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't create the unique index that backs the
/// avatar upsert's ON CONFLICT target, so we create it manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One avatar record per student; re-uploads resolve to an update.
    let stmt = Index::create()
        .if_not_exists()
        .unique()
        .name("idx_avatar_student_unique")
        .table(avatar::Entity)
        .col(avatar::Column::StudentId)
        .to_string(PostgresQueryBuilder);

    db.execute_unprepared(&stmt).await?;
    info!("Ensured index idx_avatar_student_unique exists");

    Ok(())
}
