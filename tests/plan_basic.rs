#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use planif::{
    io,
    model::{EmployeeId, OrgId},
    storage::{JsonStorage, Storage},
    Planner,
};
use std::fs;
use tempfile::tempdir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn storage_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");

    let mut planner = Planner::new();
    let org = OrgId::new("org-1");
    let schedule = planner.create_schedule(org.clone(), d(2025, 10, 1), d(2025, 10, 7));
    let role = planner.create_role(org.clone(), "barista", Some(35));
    let start = Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap();
    planner
        .create_shift(&schedule, role, None, start, start + Duration::hours(8), 2, None)
        .unwrap();

    let storage = JsonStorage::open(&path).unwrap();
    storage.save(planner.data()).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.schedules.len(), 1);
    assert_eq!(loaded.roles[0].weekly_hours_cap, Some(35));
    assert_eq!(loaded.shifts.len(), 1);
    assert_eq!(loaded.shifts[0].required_staff_count, 2);
}

#[test]
fn load_or_default_on_missing_file() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("absent.json")).unwrap();
    let data = storage.load_or_default().unwrap();
    assert!(data.shifts.is_empty());
}

#[test]
fn import_employees_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("employees.csv");
    fs::write(&path, "display_name,id\nAlice,\nBob,emp-bob\n").unwrap();

    let org = OrgId::new("org-1");
    let employees = io::import_employees_csv(&path, &org).unwrap();
    assert_eq!(employees.len(), 2);
    assert_eq!(employees[0].display_name, "Alice");
    assert_eq!(employees[1].id, EmployeeId::new("emp-bob"));
    assert!(employees.iter().all(|e| e.org_id == org));
}

#[test]
fn import_shifts_parses_dates_and_instants() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shifts.csv");

    let mut planner = Planner::new();
    let org = OrgId::new("org-1");
    let schedule = planner.create_schedule(org.clone(), d(2025, 10, 1), d(2025, 10, 7));
    let role = planner.create_role(org, "barista", None);

    fs::write(
        &path,
        format!(
            "schedule_id,role_id,start,end,required_staff_count\n\
             {sid},{rid},2025-10-01T08:00:00Z,2025-10-01T16:00:00Z,2\n\
             {sid},{rid},2025-10-02,2025-10-02,1\n",
            sid = schedule.as_str(),
            rid = role.as_str(),
        ),
    )
    .unwrap();

    let shifts = io::import_shifts_csv(&path, planner.data()).unwrap();
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[0].required_staff_count, 2);
    // Une date nue couvre la journée entière (fin exclusive au lendemain)
    assert_eq!(
        shifts[1].end_at - shifts[1].start_at,
        Duration::days(1)
    );
}

#[test]
fn import_shifts_rejects_unknown_schedule() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shifts.csv");
    fs::write(
        &path,
        "schedule_id,role_id,start,end,required_staff_count\nnope,role,2025-10-01,2025-10-01,1\n",
    )
    .unwrap();

    let planner = Planner::new();
    assert!(io::import_shifts_csv(&path, planner.data()).is_err());
}

#[test]
fn import_preferences_from_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.csv");
    fs::write(
        &path,
        "employee_id,weekday,start_time,end_time,weight,do_not_schedule,active_start,active_end\n\
         emp-1,3,09:00,18:00,5,non,,\n\
         emp-2,6,22:00,06:00,,oui,2025-01-01,2025-12-31\n\
         emp-3,2,,,,,,\n",
    )
    .unwrap();

    let prefs = io::import_preferences_csv(&path).unwrap();
    assert_eq!(prefs.len(), 3);

    assert_eq!(prefs[0].weight, Some(5));
    assert!(!prefs[0].do_not_schedule);
    assert_eq!(prefs[0].start_time, NaiveTime::from_hms_opt(9, 0, 0));

    assert!(prefs[1].do_not_schedule);
    assert_eq!(prefs[1].active_start, Some(d(2025, 1, 1)));

    // weekday seul : chargée mais sans fenêtre horaire
    assert_eq!(prefs[2].weekday, Some(2));
    assert_eq!(prefs[2].start_time, None);
}

#[test]
fn import_preferences_rejects_bad_weekday() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prefs.csv");
    fs::write(
        &path,
        "employee_id,weekday,start_time,end_time,weight,do_not_schedule\nemp-1,7,09:00,18:00,1,non\n",
    )
    .unwrap();
    assert!(io::import_preferences_csv(&path).is_err());
}

#[test]
fn import_unavailability_whole_day() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unavail.csv");
    fs::write(
        &path,
        "employee_id,start,end,reason\nemp-1,2025-10-03,2025-10-03,congé\n",
    )
    .unwrap();

    let records = io::import_unavailability_csv(&path).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].end_at - records[0].start_at, Duration::days(1));
    assert_eq!(records[0].reason.as_deref(), Some("congé"));
}

#[test]
fn export_assignments_csv_lists_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("assignments.csv");

    let mut planner = Planner::new();
    let org = OrgId::new("org-1");
    let schedule = planner.create_schedule(org.clone(), d(2025, 10, 1), d(2025, 10, 7));
    let role = planner.create_role(org.clone(), "barista", None);
    let start = Utc.with_ymd_and_hms(2025, 10, 1, 8, 0, 0).unwrap();
    let shift = planner
        .create_shift(&schedule, role, None, start, start + Duration::hours(8), 1, None)
        .unwrap();
    planner.data_mut().employees.push(planif::Employee {
        id: EmployeeId::new("emp-1"),
        org_id: org,
        display_name: "Alice".to_string(),
    });
    planner.assign(&shift, &EmployeeId::new("emp-1")).unwrap();

    io::export_assignments_csv(&path, planner.data()).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("shift_id,employee_id,display_name,role,start,end"));
    assert!(raw.contains("Alice"));
    assert!(raw.contains("barista"));
}
