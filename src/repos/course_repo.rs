/*
 * Responsibility
 * - courses collection CRUD
 */
use serde::{Deserialize, Serialize};

use crate::repos::document::{WithId, decode, decode_all, encode};
use crate::repos::error::RepoResult;
use crate::services::store::DocumentStore;

pub const COLLECTION: &str = "courses";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryFormat {
    InPerson,
    Online,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRow {
    #[serde(skip)]
    pub id: String,
    pub course_name: String,
    pub course_id: String,
    pub credits: u32,
    pub instructor: String,
    #[serde(default)]
    pub room_number: Option<String>,
    pub delivery_format: DeliveryFormat,
    pub cost: f64,
}

impl WithId for CourseRow {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub course_name: String,
    pub course_id: String,
    pub credits: u32,
    pub instructor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    pub delivery_format: DeliveryFormat,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_format: Option<DeliveryFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

pub async fn list(store: &dyn DocumentStore, limit: u32) -> RepoResult<Vec<CourseRow>> {
    decode_all(store.list(COLLECTION, limit).await?)
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> RepoResult<Option<CourseRow>> {
    store.get(COLLECTION, id).await?.map(decode).transpose()
}

pub async fn create(store: &dyn DocumentStore, course: &NewCourse) -> RepoResult<CourseRow> {
    let doc = store.create(COLLECTION, None, encode(course)?).await?;
    decode(doc)
}

pub async fn update(
    store: &dyn DocumentStore,
    id: &str,
    patch: &CoursePatch,
) -> RepoResult<Option<CourseRow>> {
    store
        .update(COLLECTION, id, encode(patch)?)
        .await?
        .map(decode)
        .transpose()
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> RepoResult<Option<CourseRow>> {
    store.delete(COLLECTION, id).await?.map(decode).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryDocumentStore;

    fn rust_101() -> NewCourse {
        NewCourse {
            course_name: "Systems Programming".into(),
            course_id: "CS-210".into(),
            credits: 3,
            instructor: "Dr. Hopper".into(),
            room_number: None,
            delivery_format: DeliveryFormat::InPerson,
            cost: 450.0,
        }
    }

    #[tokio::test]
    async fn delivery_format_is_kebab_case_on_disk() {
        let store = MemoryDocumentStore::new();
        let row = create(&store, &rust_101()).await.unwrap();

        let doc = store.get(COLLECTION, &row.id).await.unwrap().unwrap();
        assert_eq!(doc.data["deliveryFormat"], "in-person");
        assert!(doc.data.get("roomNumber").is_none());
        assert_eq!(row.delivery_format, DeliveryFormat::InPerson);
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() {
        let store = MemoryDocumentStore::new();
        let row = create(&store, &rust_101()).await.unwrap();

        let patch = CoursePatch {
            delivery_format: Some(DeliveryFormat::Hybrid),
            room_number: Some("B-12".into()),
            ..Default::default()
        };
        let updated = update(&store, &row.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.delivery_format, DeliveryFormat::Hybrid);
        assert_eq!(updated.room_number.as_deref(), Some("B-12"));
        assert_eq!(updated.course_id, "CS-210");
    }
}
