use super::LocalCache;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::slot::{read_slot, write_slot};
use crate::errors::AppResult;
use crate::models::OfficerRecord;

/// Slot key of the cached record set.
pub const CACHE_SLOT_KEY: &str = "house_officers_data";

/// Local cache kept as one JSON array in the `kv_store` table of the local
/// database. A missing slot reads as an empty set.
pub struct SlotCache {
    pool: DbPool,
}

impl SlotCache {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }
}

impl LocalCache for SlotCache {
    fn read(&self) -> AppResult<Vec<OfficerRecord>> {
        match read_slot(&self.pool.conn, CACHE_SLOT_KEY)? {
            Some(blob) => Ok(serde_json::from_str(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn write(&mut self, records: &[OfficerRecord]) -> AppResult<()> {
        let blob = serde_json::to_string(records)?;
        write_slot(&self.pool.conn, CACHE_SLOT_KEY, &blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[test]
    fn missing_slot_is_empty() {
        let cache = SlotCache::in_memory().unwrap();
        assert!(cache.read().unwrap().is_empty());
    }

    #[test]
    fn corrupt_blob_is_reported() {
        let cache = SlotCache::in_memory().unwrap();
        write_slot(&cache.pool.conn, CACHE_SLOT_KEY, "{not json").unwrap();
        assert!(matches!(cache.read(), Err(AppError::CorruptCache(_))));
    }

    #[test]
    fn reads_blob_written_by_older_clients() {
        let mut cache = SlotCache::in_memory().unwrap();
        let blob = r#"[{"id":"1735689600000","fullName":"Emeka Obi","gender":"Male",
            "dateSignedIn":"2025-01-01","unitAssigned":"Cardiology 1",
            "clinicalPresentationTopic":"","clinicalPresentationDate":"",
            "expectedSignOutDate":"2025-03-26","createdAt":"2025-01-01T08:00:00.000Z"}]"#;
        write_slot(&cache.pool.conn, CACHE_SLOT_KEY, blob).unwrap();

        let records = cache.read().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].full_name, "Emeka Obi");

        // rewritten blob stays readable
        cache.write(&records).unwrap();
        assert_eq!(cache.read().unwrap(), records);
    }
}
