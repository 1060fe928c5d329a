use super::{RemoteFailure, RemoteResult, RemoteStore};
use crate::db::initialize::init_remote_db;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_officer, insert_officer, replace_all_officers, select_all_officers, update_officer,
};
use crate::errors::AppResult;
use crate::models::{OfficerPatch, OfficerRecord};
use rusqlite::ErrorCode;
use std::path::Path;
use std::time::Duration;

/// Remote store backed by a `house_officers` table in a separate SQLite
/// file, typically on a shared drive.
///
/// The file is opened per call and never created implicitly: if it is not
/// there, the remote is unreachable. Use [`SqliteRemote::provision`] once to
/// create it.
pub struct SqliteRemote {
    path: String,
    busy_timeout: Duration,
}

impl SqliteRemote {
    pub fn new(path: &str, busy_timeout: Duration) -> Self {
        Self {
            path: path.to_string(),
            busy_timeout,
        }
    }

    /// Create the remote file (and table) if missing.
    pub fn provision(path: &str) -> AppResult<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let pool = DbPool::new(path)?;
        init_remote_db(&pool.conn)
    }

    fn open(&self) -> RemoteResult<DbPool> {
        let pool = DbPool::open_existing(&self.path).map_err(map_sqlite_error)?;
        pool.conn
            .busy_timeout(self.busy_timeout)
            .map_err(map_sqlite_error)?;
        Ok(pool)
    }
}

impl RemoteStore for SqliteRemote {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn load_all(&self) -> RemoteResult<Vec<OfficerRecord>> {
        let pool = self.open()?;
        select_all_officers(&pool.conn).map_err(map_sqlite_error)
    }

    fn insert(&mut self, record: &OfficerRecord) -> RemoteResult<OfficerRecord> {
        let pool = self.open()?;
        insert_officer(&pool.conn, record).map_err(map_sqlite_error)
    }

    fn update(&mut self, id: &str, patch: &OfficerPatch) -> RemoteResult<()> {
        let pool = self.open()?;
        update_officer(&pool.conn, id, patch).map_err(map_sqlite_error)?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> RemoteResult<()> {
        let pool = self.open()?;
        delete_officer(&pool.conn, id).map_err(map_sqlite_error)?;
        Ok(())
    }

    fn replace_all(&mut self, records: &[OfficerRecord]) -> RemoteResult<()> {
        let mut pool = self.open()?;
        pool.with_conn(|conn| replace_all_officers(conn, records))
            .map_err(map_sqlite_error)
    }
}

fn map_sqlite_error(e: rusqlite::Error) -> RemoteFailure {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) => match err.code {
            ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::PermissionDenied => {
                RemoteFailure::Unreachable(e.to_string())
            }
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => RemoteFailure::Timeout,
            ErrorCode::ConstraintViolation => RemoteFailure::Rejected {
                status: 409,
                message: e.to_string(),
            },
            _ => RemoteFailure::Backend(e.to_string()),
        },
        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            RemoteFailure::Decode(e.to_string())
        }
        _ => RemoteFailure::Backend(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, NewOfficer, Unit};
    use chrono::NaiveDate;

    fn officer(name: &str, unit: Unit) -> OfficerRecord {
        OfficerRecord::create(NewOfficer {
            full_name: name.into(),
            gender: Gender::Female,
            date_signed_in: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            unit_assigned: unit,
            clinical_presentation_topic: Some("Diabetic ketoacidosis".into()),
            clinical_presentation_date: NaiveDate::from_ymd_opt(2025, 2, 14),
        })
        .unwrap()
    }

    fn remote() -> (tempfile::TempDir, SqliteRemote) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.sqlite");
        let path = path.to_string_lossy().to_string();
        SqliteRemote::provision(&path).unwrap();
        (dir, SqliteRemote::new(&path, Duration::from_secs(1)))
    }

    #[test]
    fn missing_file_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.sqlite");
        let r = SqliteRemote::new(&path.to_string_lossy(), Duration::from_secs(1));

        assert!(matches!(r.load_all(), Err(RemoteFailure::Unreachable(_))));
        assert!(!path.exists());
    }

    #[test]
    fn crud_against_shared_file() {
        let (_dir, mut r) = remote();
        let a = officer("Amaka Nwosu", Unit::Neurology);
        let b = officer("Chidi Okeke", Unit::InfectiousDiseaseDermatology);

        let stored = r.insert(&a).unwrap();
        assert_eq!(stored, a);
        r.insert(&b).unwrap();
        assert_eq!(r.load_all().unwrap().len(), 2);

        r.update(
            &a.id,
            &OfficerPatch {
                clinical_presentation_topic: Some(None),
                unit_assigned: Some(Unit::Rheumatology),
                ..Default::default()
            },
        )
        .unwrap();
        let rows = r.load_all().unwrap();
        let a2 = rows.iter().find(|x| x.id == a.id).unwrap();
        assert_eq!(a2.unit_assigned, Unit::Rheumatology);
        assert_eq!(a2.clinical_presentation_topic, None);

        r.delete(&b.id).unwrap();
        assert_eq!(r.load_all().unwrap().len(), 1);

        r.replace_all(&[b.clone()]).unwrap();
        assert_eq!(r.load_all().unwrap(), vec![b]);
    }

    #[test]
    fn newest_first() {
        let (_dir, mut r) = remote();
        let mut old = officer("Old", Unit::Nephrology);
        old.created_at = old.created_at - chrono::Duration::days(3);
        let new = officer("New", Unit::Nephrology);

        r.insert(&old).unwrap();
        r.insert(&new).unwrap();

        let names: Vec<_> = r.load_all().unwrap().into_iter().map(|o| o.full_name).collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[test]
    fn unknown_unit_in_remote_row_is_a_decode_failure() {
        let (_dir, r) = remote();
        let pool = DbPool::new(&r.path).unwrap();
        pool.conn
            .execute(
                "INSERT INTO house_officers (fullName, gender, dateSignedIn, unitAssigned, expectedSignOutDate)
                 VALUES ('X', 'Male', '2025-01-01', 'Psychiatry', '2025-03-26')",
                [],
            )
            .unwrap();

        assert!(matches!(r.load_all(), Err(RemoteFailure::Decode(_))));
    }
}
