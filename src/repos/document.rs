//! Typed (de)serialization of store documents.
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::repos::error::RepoResult;
use crate::services::store::Document;

/// Row types carry the document id outside of the JSON body.
pub trait WithId {
    fn set_id(&mut self, id: String);
}

pub fn decode<T>(doc: Document) -> RepoResult<T>
where
    T: DeserializeOwned + WithId,
{
    let mut row: T = serde_json::from_value(doc.data)?;
    row.set_id(doc.id);
    Ok(row)
}

pub fn decode_all<T>(docs: Vec<Document>) -> RepoResult<Vec<T>>
where
    T: DeserializeOwned + WithId,
{
    docs.into_iter().map(decode).collect()
}

pub fn encode<T: Serialize>(value: &T) -> RepoResult<Value> {
    Ok(serde_json::to_value(value)?)
}
