//! PostgreSQL document store: one JSONB row per document.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Collection, Document, DocumentStore, Filter, StoreError, Window};

/// Document store backed by the `documents` table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Build the `AND ...` conditions for a filter, numbering parameters from
/// `first_param`. Field names come from the filter builder's whitelist.
fn filter_conditions(filter: &Filter, first_param: usize) -> String {
    filter
        .matches()
        .iter()
        .enumerate()
        .map(|(i, m)| format!(" AND body -> '{}' @> ${}", m.field, first_param + i))
        .collect()
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) FROM documents WHERE collection = $1{}",
            filter_conditions(filter, 2)
        );

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(collection.as_str());
        for m in filter.matches() {
            query = query.bind(m.value.clone());
        }

        let count = query.fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        projection: Option<&[&str]>,
        window: Option<Window>,
    ) -> Result<Vec<Document>, StoreError> {
        let paging = match window {
            Some(w) => format!(" LIMIT {} OFFSET {}", w.limit, w.skip),
            None => String::new(),
        };
        // $2 is NULL when no projection is requested.
        let sql = format!(
            "SELECT id, \
                CASE WHEN $2::text[] IS NULL THEN body \
                ELSE (SELECT COALESCE(jsonb_object_agg(key, value), '{{}}'::jsonb) \
                      FROM jsonb_each(body) WHERE key = ANY($2)) END AS body \
             FROM documents WHERE collection = $1{} ORDER BY seq ASC{paging}",
            filter_conditions(filter, 3)
        );

        let fields: Option<Vec<String>> =
            projection.map(|fields| fields.iter().map(|f| f.to_string()).collect());

        let mut query = sqlx::query_as::<_, Document>(&sql)
            .bind(collection.as_str())
            .bind(fields);
        for m in filter.matches() {
            query = query.bind(m.value.clone());
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let doc = sqlx::query_as::<_, Document>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn insert(&self, collection: Collection, body: Value) -> Result<Document, StoreError> {
        let doc = sqlx::query_as::<_, Document>(
            "INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3) RETURNING id, body",
        )
        .bind(Uuid::now_v7())
        .bind(collection.as_str())
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn update(
        &self,
        collection: Collection,
        id: Uuid,
        changes: Value,
    ) -> Result<Option<Document>, StoreError> {
        let doc = sqlx::query_as::<_, Document>(
            r#"
            UPDATE documents SET body = body || $3, updated_at = NOW()
            WHERE collection = $1 AND id = $2
            RETURNING id, body
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(changes)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, collection: Collection) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
