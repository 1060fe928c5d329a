use chrono::NaiveDate;
use hoflow::core::query::{FilterOptions, SortField, SortOrder, apply_filters};
use hoflow::models::{Gender, NewOfficer, OfficerPatch, OfficerRecord, Unit};
use hoflow::store::{
    LocalCache, RecordStore, RemoteFailure, RemoteResult, RemoteStore, SlotCache, SqliteRemote,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn officer(name: &str, gender: Gender, unit: Unit, signed_in: NaiveDate) -> OfficerRecord {
    OfficerRecord::create(NewOfficer {
        full_name: name.into(),
        gender,
        date_signed_in: signed_in,
        unit_assigned: unit,
        clinical_presentation_topic: None,
        clinical_presentation_date: None,
    })
    .unwrap()
}

/// Remote whose availability the test flips at will.
#[derive(Clone, Default)]
struct FlakyRemote {
    rows: Rc<RefCell<Vec<OfficerRecord>>>,
    down: Rc<RefCell<bool>>,
}

impl FlakyRemote {
    fn check(&self) -> RemoteResult<()> {
        if *self.down.borrow() {
            Err(RemoteFailure::Unreachable("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

impl RemoteStore for FlakyRemote {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn load_all(&self) -> RemoteResult<Vec<OfficerRecord>> {
        self.check()?;
        Ok(self.rows.borrow().clone())
    }

    fn insert(&mut self, record: &OfficerRecord) -> RemoteResult<OfficerRecord> {
        self.check()?;
        self.rows.borrow_mut().insert(0, record.clone());
        Ok(record.clone())
    }

    fn update(&mut self, id: &str, patch: &OfficerPatch) -> RemoteResult<()> {
        self.check()?;
        if let Some(r) = self.rows.borrow_mut().iter_mut().find(|r| r.id == id) {
            r.apply(patch);
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> RemoteResult<()> {
        self.check()?;
        self.rows.borrow_mut().retain(|r| r.id != id);
        Ok(())
    }

    fn replace_all(&mut self, records: &[OfficerRecord]) -> RemoteResult<()> {
        self.check()?;
        *self.rows.borrow_mut() = records.to_vec();
        Ok(())
    }
}

fn store_with(remote: &FlakyRemote) -> RecordStore {
    RecordStore::new(
        Box::new(remote.clone()),
        Box::new(SlotCache::in_memory().unwrap()),
    )
}

#[test]
fn outage_falls_back_to_the_local_copy_and_sync_heals_it() {
    let remote = FlakyRemote::default();
    let mut store = store_with(&remote);

    let jane = officer("Jane Doe", Gender::Female, Unit::Nephrology, d(2025, 1, 1));
    store.add(jane.clone()).unwrap();
    assert_eq!(remote.rows.borrow().len(), 1);

    // remote goes down: writes land locally, reads keep working
    *remote.down.borrow_mut() = true;
    let john = officer("John Roe", Gender::Male, Unit::Neurology, d(2025, 1, 2));
    store.add(john.clone()).unwrap();
    assert!(matches!(
        store.last_remote_failure(),
        Some(RemoteFailure::Unreachable(_))
    ));

    let seen = store.load().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(remote.rows.borrow().len(), 1);

    // sync refuses while down, then pushes the full local set
    assert!(store.push_local_to_remote().is_err());
    *remote.down.borrow_mut() = false;
    assert_eq!(store.push_local_to_remote().unwrap(), 2);
    assert_eq!(remote.rows.borrow().len(), 2);
    assert!(store.last_remote_failure().is_none());
}

#[test]
fn empty_remote_never_wipes_the_local_copy() {
    let remote = FlakyRemote::default();
    let mut store = store_with(&remote);

    store
        .add(officer("Jane Doe", Gender::Female, Unit::Nephrology, d(2025, 1, 1)))
        .unwrap();
    remote.rows.borrow_mut().clear();

    let seen = store.load().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].full_name, "Jane Doe");
}

#[test]
fn non_empty_remote_replaces_the_local_copy() {
    let remote = FlakyRemote::default();
    let mut store = store_with(&remote);

    store
        .add(officer("Jane Doe", Gender::Female, Unit::Nephrology, d(2025, 1, 1)))
        .unwrap();

    // another workstation edited the shared table
    let other = officer("Ada Obi", Gender::Female, Unit::Endocrinology, d(2025, 2, 1));
    *remote.rows.borrow_mut() = vec![other.clone()];

    assert_eq!(store.load().unwrap(), vec![other.clone()]);

    // the local slot now mirrors the remote even when it goes away again
    *remote.down.borrow_mut() = true;
    assert_eq!(store.load().unwrap(), vec![other]);
}

#[test]
fn sqlite_remote_serves_several_caches() {
    let dir = tempfile::tempdir().unwrap();
    let shared = dir.path().join("shared.sqlite").to_string_lossy().to_string();
    SqliteRemote::provision(&shared).unwrap();

    let open = |name: &str| {
        let local = dir.path().join(name).to_string_lossy().to_string();
        RecordStore::new(
            Box::new(SqliteRemote::new(&shared, Duration::from_secs(2))),
            Box::new(SlotCache::open(&local).unwrap()),
        )
    };

    let mut ward_a = open("a.sqlite");
    let mut ward_b = open("b.sqlite");

    let jane = officer("Jane Doe", Gender::Female, Unit::Nephrology, d(2025, 1, 1));
    ward_a.add(jane.clone()).unwrap();
    assert!(ward_a.last_remote_failure().is_none());

    let seen = ward_b.load().unwrap();
    assert_eq!(seen, vec![jane.clone()]);

    let patch = OfficerPatch {
        unit_assigned: Some(Unit::Neurology),
        ..Default::default()
    };
    assert!(ward_b.update(&jane.id, &patch).unwrap());

    let seen = ward_a.load().unwrap();
    assert_eq!(seen[0].unit_assigned, Unit::Neurology);

    assert!(ward_a.delete(&jane.id).unwrap());
    // empty remote: B keeps its local copy
    assert_eq!(ward_b.load().unwrap().len(), 1);
}

#[test]
fn nephrology_males_sorted_by_name() {
    let base = d(2025, 1, 1);
    let mix = [
        ("Zed Okafor", Gender::Male, Unit::Nephrology),
        ("Amaka Eze", Gender::Female, Unit::Nephrology),
        ("Bayo Ade", Gender::Male, Unit::Nephrology),
        ("Chidi Nwosu", Gender::Male, Unit::Neurology),
        ("Musa Bello", Gender::Male, Unit::Nephrology),
        ("Ngozi Uche", Gender::Female, Unit::Endocrinology),
        ("Emeka Obi", Gender::Male, Unit::Gastroenterology),
        ("Ifeoma Kalu", Gender::Female, Unit::Nephrology),
        ("Tunde Ojo", Gender::Male, Unit::Cardiology1),
        ("Kelechi Ibe", Gender::Male, Unit::Pulmonology),
    ];
    let records: Vec<OfficerRecord> = mix
        .iter()
        .enumerate()
        .map(|(i, (n, g, u))| officer(n, *g, *u, base + chrono::Days::new(i as u64)))
        .collect();

    let opts = FilterOptions {
        unit: Some(Unit::Nephrology),
        gender: Some(Gender::Male),
        search_term: Some(String::new()),
        sort_by: SortField::FullName,
        sort_order: SortOrder::Asc,
    };

    let names: Vec<String> = apply_filters(&records, &opts)
        .into_iter()
        .map(|r| r.full_name)
        .collect();
    assert_eq!(names, ["Bayo Ade", "Musa Bello", "Zed Okafor"]);
}

#[test]
fn cache_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.sqlite").to_string_lossy().to_string();
    let jane = officer("Jane Doe", Gender::Female, Unit::Nephrology, d(2025, 1, 1));

    SlotCache::open(&path).unwrap().write(&[jane.clone()]).unwrap();
    assert_eq!(SlotCache::open(&path).unwrap().read().unwrap(), vec![jane]);
}
