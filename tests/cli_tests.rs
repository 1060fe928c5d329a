use chrono::NaiveDate;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::Sandbox;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn add_list_filter_delete_round_trip() {
    let sb = Sandbox::initialized();

    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");

    let recs = sb.records();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].full_name, "Jane Doe");
    assert_eq!(recs[0].expected_sign_out_date, d(2025, 3, 26));
    assert!(!recs[0].id.is_empty());

    sb.ho()
        .args(["list", "--unit", "Nephrology", "--gender", "F"])
        .assert()
        .success()
        .stdout(contains("Jane Doe").and(contains("Mar 26, 2025")));

    sb.ho()
        .args(["list", "--unit", "Neurology"])
        .assert()
        .success()
        .stdout(contains("Jane Doe").not())
        .stdout(contains("No officers match"));

    let id = sb.id_of("Jane Doe");
    sb.ho().args(["del", &id, "--yes"]).assert().success();

    assert!(sb.records().is_empty());
    sb.ho()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No officers registered yet"));
}

#[test]
fn add_rejects_bad_input_without_writing() {
    let sb = Sandbox::initialized();

    sb.ho()
        .args(["add", "--name", "  ", "--gender", "M", "--unit", "Neurology", "--signed-in", "2025-01-01"])
        .assert()
        .failure();

    sb.ho()
        .args(["add", "--name", "A", "--gender", "M", "--unit", "Oncology", "--signed-in", "2025-01-01"])
        .assert()
        .failure()
        .stderr(contains("Unknown unit"));

    sb.ho()
        .args(["add", "--name", "A", "--gender", "M", "--unit", "Neurology", "--signed-in", "01/01/2025"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));

    assert!(sb.records().is_empty());
}

#[test]
fn edit_changes_only_given_fields_and_rederives_sign_out() {
    let sb = Sandbox::initialized();
    sb.add("Ada Obi", "F", "Neurology", "2025-01-01");
    let id = sb.id_of("Ada Obi");

    sb.ho()
        .args(["edit", &id, "--signed-in", "2025-02-01", "--topic", "Stroke"])
        .assert()
        .success();

    let rec = sb.records().into_iter().next().unwrap();
    assert_eq!(rec.full_name, "Ada Obi");
    assert_eq!(rec.date_signed_in, d(2025, 2, 1));
    assert_eq!(rec.expected_sign_out_date, d(2025, 4, 26));
    assert_eq!(rec.clinical_presentation_topic.as_deref(), Some("Stroke"));

    // "" clears the topic
    sb.ho().args(["edit", &id, "--topic", ""]).assert().success();
    assert_eq!(sb.records()[0].clinical_presentation_topic, None);
}

#[test]
fn sign_out_cannot_override_a_new_sign_in() {
    let sb = Sandbox::initialized();
    sb.add("Ada Obi", "F", "Neurology", "2025-01-01");
    let id = sb.id_of("Ada Obi");

    sb.ho()
        .args(["edit", &id, "--signed-in", "2025-02-01", "--sign-out", "2025-06-30"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));

    let rec = sb.records().into_iter().next().unwrap();
    assert_eq!(rec.date_signed_in, d(2025, 1, 1));
    assert_eq!(rec.expected_sign_out_date, d(2025, 3, 26));

    // an explicit sign-out alone is still accepted
    sb.ho()
        .args(["edit", &id, "--sign-out", "2025-06-30"])
        .assert()
        .success();
    assert_eq!(sb.records()[0].expected_sign_out_date, d(2025, 6, 30));
}

#[test]
fn unknown_id_is_an_error() {
    let sb = Sandbox::initialized();

    sb.ho()
        .args(["del", "does-not-exist", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No officer found"));

    sb.ho()
        .args(["edit", "does-not-exist", "--name", "X"])
        .assert()
        .failure()
        .stderr(contains("No officer found"));
}

#[test]
fn priority_reports_shortages() {
    let sb = Sandbox::initialized();
    sb.add("Neph One", "M", "Nephrology", "2025-01-01");
    sb.add("Neph Two", "F", "Nephrology", "2025-01-02");

    sb.ho()
        .arg("priority")
        .assert()
        .success()
        .stdout(contains("Nephrology").and(contains("2/3")).and(contains("need 1 more")))
        .stdout(contains("Overall: 2/9"));
}

#[test]
fn calendar_link_for_missing_presentation_is_a_warning() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");
    let id = sb.id_of("Jane Doe");

    sb.ho()
        .args(["calendar", &id])
        .assert()
        .success()
        .stdout(contains("https://calendar.google.com/calendar/render?action=TEMPLATE"))
        .stdout(contains("dates=20250326%2F20250326"));

    sb.ho()
        .args(["calendar", &id, "--kind", "presentation"])
        .assert()
        .success()
        .stdout(contains("No presentation date set for Jane Doe"));
}

#[test]
fn timeline_lists_sign_outs() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");

    sb.ho()
        .arg("timeline")
        .assert()
        .success()
        .stdout(contains("Jane Doe").and(contains("Mar 26, 2025")));
}

#[test]
fn pdf_export_without_signer_writes_nothing() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");
    let out = sb.out_path("report.pdf");

    sb.ho()
        .args(["export", "--format", "pdf", "--file", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("--signer"));
    assert!(!out.exists());

    sb.ho()
        .args(["export", "--format", "pdf", "--signer", "   ", "--file", out.to_str().unwrap()])
        .assert()
        .failure();
    assert!(!out.exists());
}

#[test]
fn pdf_export_with_signer() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");
    let out = sb.out_path("report.pdf");

    sb.ho()
        .args(["export", "--signer", "Dr. Test", "--file", out.to_str().unwrap()])
        .assert()
        .success();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn csv_export_honours_filters_and_ids() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");
    sb.add("John Roe", "M", "Nephrology", "2025-01-05");
    sb.add("Ada Obi", "F", "Neurology", "2025-01-03");
    let out = sb.out_path("officers.csv");

    sb.ho()
        .args(["export", "--format", "csv", "--unit", "Nephrology", "--file", out.to_str().unwrap()])
        .assert()
        .success();

    let csv = std::fs::read_to_string(&out).unwrap();
    assert!(csv.lines().next().unwrap().contains("fullName"));
    assert!(csv.contains("Jane Doe"));
    assert!(csv.contains("John Roe"));
    assert!(!csv.contains("Ada Obi"));

    let id = sb.id_of("Ada Obi");
    let json = sb.out_path("one.json");
    sb.ho()
        .args(["export", "--format", "json", "--ids", &id, "--file", json.to_str().unwrap()])
        .assert()
        .success();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["fullName"], "Ada Obi");
}

#[test]
fn empty_view_exports_nothing() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");
    let out = sb.out_path("none.csv");

    sb.ho()
        .args(["export", "--format", "csv", "--unit", "Pulmonology", "--file", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("nothing exported"));
    assert!(!out.exists());
}

#[test]
fn relative_export_path_is_rejected() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");

    sb.ho()
        .args(["export", "--format", "csv", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("absolute"));
}

#[test]
fn audit_log_records_operations() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");
    let id = sb.id_of("Jane Doe");
    sb.ho().args(["del", &id, "-y"]).assert().success();

    sb.ho()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("add").and(contains("del")))
        .stdout(contains("Jane Doe (Nephrology)"));
}

#[test]
fn sync_without_remote_fails() {
    let sb = Sandbox::initialized();
    sb.add("Jane Doe", "F", "Nephrology", "2025-01-01");

    sb.ho()
        .args(["sync", "--yes"])
        .assert()
        .failure()
        .stderr(contains("no remote store configured"));
}
