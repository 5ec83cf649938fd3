/*
 * Responsibility
 * - documents テーブル (collection, id, data JSONB) 向け SQLx 操作
 * - PgPool を受け取り DocumentStore を実装する
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use crate::services::store::client::{
    Document, DocumentStore, StoreError, StoreResult, ensure_object, new_document_id,
};

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: Value,
    #[sqlx(rename = "createdAt")]
    created_at: DateTime<Utc>,
    #[sqlx(rename = "updatedAt")]
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            data: row.data,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Postgres-backed document store (one JSONB row per document).
#[derive(Clone, Debug)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    // Connect and apply embedded migrations.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = PgPool::connect(database_url).await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.into()))?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self, collection: &str, limit: u32) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data, "createdAt", "updatedAt"
            FROM documents
            WHERE collection = $1
            ORDER BY "createdAt" DESC, id
            LIMIT $2
            "#,
        )
        .bind(collection)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data, "createdAt", "updatedAt"
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    async fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Value,
    ) -> StoreResult<Document> {
        ensure_object(&data)?;
        let id = id.map(str::to_string).unwrap_or_else(new_document_id);

        // ON CONFLICT DO NOTHING returns no row when the id is taken.
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO NOTHING
            RETURNING id, data, "createdAt", "updatedAt"
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(&data)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Document::from).ok_or_else(|| StoreError::Conflict {
            collection: collection.to_string(),
            id,
        })
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> StoreResult<Option<Document>> {
        ensure_object(&patch)?;

        // jsonb `||` replaces top-level keys only (shallow merge).
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET
                data = data || $3,
                "updatedAt" = now()
            WHERE collection = $1 AND id = $2
            RETURNING id, data, "createdAt", "updatedAt"
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(&patch)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            DELETE FROM documents
            WHERE collection = $1 AND id = $2
            RETURNING id, data, "createdAt", "updatedAt"
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Document::from))
    }
}
