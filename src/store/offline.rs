use super::{RemoteFailure, RemoteResult, RemoteStore};
use crate::models::{OfficerPatch, OfficerRecord};

/// Stand-in remote when none is configured: every call reports
/// [`RemoteFailure::NotConfigured`], so the store runs on the local cache.
pub struct OfflineRemote;

impl RemoteStore for OfflineRemote {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn load_all(&self) -> RemoteResult<Vec<OfficerRecord>> {
        Err(RemoteFailure::NotConfigured)
    }

    fn insert(&mut self, _record: &OfficerRecord) -> RemoteResult<OfficerRecord> {
        Err(RemoteFailure::NotConfigured)
    }

    fn update(&mut self, _id: &str, _patch: &OfficerPatch) -> RemoteResult<()> {
        Err(RemoteFailure::NotConfigured)
    }

    fn delete(&mut self, _id: &str) -> RemoteResult<()> {
        Err(RemoteFailure::NotConfigured)
    }

    fn replace_all(&mut self, _records: &[OfficerRecord]) -> RemoteResult<()> {
        Err(RemoteFailure::NotConfigured)
    }
}
