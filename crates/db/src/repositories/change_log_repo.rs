//! Repository for the append-only `change_logs` table.

use orgdir_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::change_log::{ChangeLog, ChangeLogQuery, CreateChangeLog};

const COLUMNS: &str = "id, entity_type, entity_id, action, changes, actor_id, created_at";

/// Provides insert and query operations for change-log entries.
pub struct ChangeLogRepo;

impl ChangeLogRepo {
    /// Append an entry inside the transaction that performed the mutation.
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateChangeLog,
    ) -> Result<ChangeLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO change_logs (entity_type, entity_id, action, changes, actor_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeLog>(&query)
            .bind(&input.entity_type)
            .bind(&input.entity_id)
            .bind(&input.action)
            .bind(&input.changes)
            .bind(&input.actor_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Newest entries first.
    pub async fn list(pool: &PgPool, params: &ChangeLogQuery) -> Result<Vec<ChangeLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM change_logs \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, ChangeLog>(&query)
            .bind(params.limit())
            .bind(params.offset())
            .fetch_all(pool)
            .await
    }

    /// All entries for one entity, oldest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: &str,
    ) -> Result<Vec<ChangeLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM change_logs \
             WHERE entity_type = $1 AND entity_id = $2 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ChangeLog>(&query)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM change_logs")
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ChangeLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM change_logs WHERE id = $1");
        sqlx::query_as::<_, ChangeLog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
