/*
 * Responsibility
 * - courseEnrollment collection CRUD
 * - delete は削除した内容を返す (通知メール本文で使う)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::document::{WithId, decode, decode_all, encode};
use crate::repos::error::RepoResult;
use crate::services::store::DocumentStore;

pub const COLLECTION: &str = "courseEnrollment";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRow {
    #[serde(skip)]
    pub id: String,
    pub student_id: String,
    pub course_name: String,
    pub course_id: String,
    pub semester: String,
    pub enrolled_at: DateTime<Utc>,
}

impl WithId for EnrollmentRow {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub student_id: String,
    pub course_name: String,
    pub course_id: String,
    pub semester: String,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
}

pub async fn list(store: &dyn DocumentStore, limit: u32) -> RepoResult<Vec<EnrollmentRow>> {
    decode_all(store.list(COLLECTION, limit).await?)
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> RepoResult<Option<EnrollmentRow>> {
    store.get(COLLECTION, id).await?.map(decode).transpose()
}

pub async fn create(
    store: &dyn DocumentStore,
    enrollment: &NewEnrollment,
) -> RepoResult<EnrollmentRow> {
    let doc = store.create(COLLECTION, None, encode(enrollment)?).await?;
    decode(doc)
}

pub async fn update(
    store: &dyn DocumentStore,
    id: &str,
    patch: &EnrollmentPatch,
) -> RepoResult<Option<EnrollmentRow>> {
    store
        .update(COLLECTION, id, encode(patch)?)
        .await?
        .map(decode)
        .transpose()
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> RepoResult<Option<EnrollmentRow>> {
    store.delete(COLLECTION, id).await?.map(decode).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::services::store::MemoryDocumentStore;

    #[tokio::test]
    async fn enrolled_at_round_trips_as_rfc3339() {
        let store = MemoryDocumentStore::new();
        let at = Utc.with_ymd_and_hms(2025, 1, 6, 9, 30, 0).unwrap();
        let row = create(
            &store,
            &NewEnrollment {
                student_id: "uid-ada".into(),
                course_name: "Systems Programming".into(),
                course_id: "CS-210".into(),
                semester: "Winter 2025".into(),
                enrolled_at: at,
            },
        )
        .await
        .unwrap();
        assert_eq!(row.enrolled_at, at);

        let doc = store.get(COLLECTION, &row.id).await.unwrap().unwrap();
        assert_eq!(doc.data["enrolledAt"], "2025-01-06T09:30:00Z");

        let removed = delete(&store, &row.id).await.unwrap().unwrap();
        assert_eq!(removed.course_name, "Systems Programming");
        assert!(get(&store, &row.id).await.unwrap().is_none());
    }
}
