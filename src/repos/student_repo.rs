/*
 * Responsibility
 * - students collection CRUD
 * - document id は identity provider の uid と一致させる運用 (same-user 認可の前提)
 */
use serde::{Deserialize, Serialize};

use crate::repos::document::{WithId, decode, decode_all, encode};
use crate::repos::error::RepoResult;
use crate::services::store::DocumentStore;

pub const COLLECTION: &str = "students";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    #[serde(skip)]
    pub id: String,
    pub student_id: i64,
    pub full_name: String,
    pub email: String,
    pub program: String,
    pub program_year: u32,
}

impl WithId for StudentRow {
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub student_id: i64,
    pub full_name: String,
    pub email: String,
    pub program: String,
    pub program_year: u32,
}

// None fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_year: Option<u32>,
}

pub async fn list(store: &dyn DocumentStore, limit: u32) -> RepoResult<Vec<StudentRow>> {
    decode_all(store.list(COLLECTION, limit).await?)
}

pub async fn get(store: &dyn DocumentStore, id: &str) -> RepoResult<Option<StudentRow>> {
    store.get(COLLECTION, id).await?.map(decode).transpose()
}

pub async fn create(
    store: &dyn DocumentStore,
    id: Option<&str>,
    student: &NewStudent,
) -> RepoResult<StudentRow> {
    let doc = store.create(COLLECTION, id, encode(student)?).await?;
    decode(doc)
}

pub async fn update(
    store: &dyn DocumentStore,
    id: &str,
    patch: &StudentPatch,
) -> RepoResult<Option<StudentRow>> {
    store
        .update(COLLECTION, id, encode(patch)?)
        .await?
        .map(decode)
        .transpose()
}

pub async fn delete(store: &dyn DocumentStore, id: &str) -> RepoResult<Option<StudentRow>> {
    store.delete(COLLECTION, id).await?.map(decode).transpose()
}
