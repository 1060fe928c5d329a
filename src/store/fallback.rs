//! Load fallback policy, kept free of I/O so it can be tested on its own.

use super::{RemoteFailure, RemoteResult};
use crate::models::OfficerRecord;
use std::fmt;

/// Why the local cache was used instead of the remote answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The remote answered with zero rows. An empty answer never
    /// clobbers a populated cache.
    RemoteEmpty,
    RemoteFailed(RemoteFailure),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::RemoteEmpty => write!(f, "remote_empty"),
            FallbackReason::RemoteFailed(e) => write!(f, "remote_failed ({e})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadDecision {
    UseRemote(Vec<OfficerRecord>),
    UseLocal(FallbackReason),
}

pub fn resolve_load(remote: RemoteResult<Vec<OfficerRecord>>) -> LoadDecision {
    match remote {
        Ok(records) if records.is_empty() => LoadDecision::UseLocal(FallbackReason::RemoteEmpty),
        Ok(records) => LoadDecision::UseRemote(records),
        Err(e) => LoadDecision::UseLocal(FallbackReason::RemoteFailed(e)),
    }
}
