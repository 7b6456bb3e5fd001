#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use shiftplan::{
    io, Assignment, EmployeeId, EmployeeStatus, JsonStorage, ShiftPattern, ShiftPatternId,
    Storage, Workspace,
};
use std::fs;
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn import_employees_with_lists_and_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("employees.csv");
    fs::write(
        &path,
        "id,last_name,first_name,employee_number,status,preferred_shifts,days_off,max_shifts\n\
         alice,Martin,Alice,E001,active,early;late,2024-04-01;2024-04-02,20\n\
         ,Durand,Bob,E002,,night,,\n",
    )
    .unwrap();

    let people = io::import_employees_csv(&path).unwrap();
    assert_eq!(people.len(), 2);

    let alice = &people[0];
    assert_eq!(alice.id, EmployeeId::new("alice"));
    assert_eq!(alice.preferred_shifts.len(), 2);
    assert_eq!(alice.days_off, vec![date(2024, 4, 1), date(2024, 4, 2)]);
    assert_eq!(alice.max_shifts_per_month, 20);

    let bob = &people[1];
    assert!(!bob.id.is_empty());
    assert_eq!(bob.status, EmployeeStatus::Active);
    assert_eq!(bob.max_shifts_per_month, 22);
    assert!(bob.days_off.is_empty());
}

#[test]
fn import_employees_rejects_bad_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("employees.csv");
    fs::write(
        &path,
        "id,last_name,first_name,employee_number,status,preferred_shifts\n\
         x,Martin,Alice,E001,active,a;b;c;d\n",
    )
    .unwrap();
    assert!(io::import_employees_csv(&path).is_err());

    fs::write(
        &path,
        "id,last_name,first_name,employee_number,status\nx,Martin,Alice,E001,retired\n",
    )
    .unwrap();
    let err = io::import_employees_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("invalid status"));
}

#[test]
fn import_patterns_and_requirements() {
    let dir = tempdir().unwrap();
    let patterns = dir.path().join("patterns.csv");
    fs::write(&patterns, "id,name,start_time,end_time\nearly,Matin,09:00,17:00\n").unwrap();
    let p = io::import_patterns_csv(&patterns).unwrap();
    assert_eq!(p[0].start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());

    let reqs = dir.path().join("requirements.csv");
    fs::write(
        &reqs,
        "date,required_staff,specific_assignments\n\
         2024-04-01,1,alice:early;bob:late\n\
         2024-04-02,,\n",
    )
    .unwrap();
    let r = io::import_requirements_csv(&reqs).unwrap();
    assert_eq!(r[0].required_staff, 1);
    assert_eq!(r[0].specific_assignments.len(), 2);
    assert_eq!(r[0].specific_assignments[1].shift_pattern_id, ShiftPatternId::new("late"));
    assert_eq!(r[1].required_staff, 3);
    assert!(r[1].specific_assignments.is_empty());

    assert!(io::parse_specific("alice-early").is_err());
}

fn sample_workspace() -> Workspace {
    let mut alice = shiftplan::Employee::new("Martin", "Alice");
    alice.id = EmployeeId::new("alice");
    let mut bob = shiftplan::Employee::new("Durand", "Bob");
    bob.id = EmployeeId::new("bob");
    let cell = |emp: &str, d: NaiveDate, p: &str| Assignment {
        employee_id: EmployeeId::new(emp),
        date: d,
        shift_pattern_id: ShiftPatternId::new(p),
    };
    Workspace {
        employees: vec![alice, bob],
        shift_patterns: vec![ShiftPattern::new(
            "early",
            "Matin",
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        )],
        day_requirements: Vec::new(),
        schedule: vec![
            cell("alice", date(2023, 2, 1), "early"),
            cell("bob", date(2023, 2, 2), "ghost-pattern"),
            cell("alice", date(2023, 3, 1), "early"),
        ],
    }
}

#[test]
fn month_matrix_csv() {
    let csv = io::render_schedule_csv(&sample_workspace(), date(2023, 2, 14)).unwrap();
    insta::assert_snapshot!(csv, @r"
    name,2/1,2/2,2/3,2/4,2/5,2/6,2/7,2/8,2/9,2/10,2/11,2/12,2/13,2/14,2/15,2/16,2/17,2/18,2/19,2/20,2/21,2/22,2/23,2/24,2/25,2/26,2/27,2/28
    Martin Alice,Matin,,,,,,,,,,,,,,,,,,,,,,,,,,,
    Durand Bob,,,,,,,,,,,,,,,,,,,,,,,,,,,,
    ");
}

#[test]
fn workspace_json_roundtrip_through_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ws.json");
    let ws = sample_workspace();
    io::export_workspace_json(&path, &ws).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"shiftPatternId\": \"ghost-pattern\""));
    assert!(raw.contains("\"maxShiftsPerMonth\": 22"));

    let loaded = JsonStorage::open(&path).unwrap().load().unwrap();
    assert_eq!(loaded.schedule, ws.schedule);
    assert_eq!(loaded.shift_patterns, ws.shift_patterns);
}
