/*
 * Responsibility
 * - 一覧系 endpoint の query (?limit=)
 */
use serde::Deserialize;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn limit(&self) -> Result<u32, &'static str> {
        match self.limit {
            None => Ok(DEFAULT_LIMIT),
            Some(n) if (1..=MAX_LIMIT).contains(&n) => Ok(n),
            Some(_) => Err("limit must be between 1 and 100"),
        }
    }
}
