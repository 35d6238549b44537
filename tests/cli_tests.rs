mod common;
use common::TestEnv;
use predicates::str::contains;

#[test]
fn test_init_creates_config_file() {
    let env = TestEnv::new();
    env.cmd()
        .arg("init")
        .assert()
        .success()
        .stdout(contains("initialization completed"));

    let conf = env.dir.path().join("punchclock.conf");
    let content = std::fs::read_to_string(conf).expect("config written");
    assert!(content.contains("weekly_target_hours: 40"));
    assert!(content.contains(&env.db));
}

#[test]
fn test_punches_alternate_and_compute_a_full_day() {
    let env = TestEnv::new();
    for t in ["08:00", "12:30", "13:00", "17:30"] {
        env.punch(&format!("2024-05-14 {t}"));
    }

    let days = env.days();
    assert_eq!(days.len(), 1);

    let day = &days[0];
    assert_eq!(day["date"], "2024-05-14");
    assert_eq!(day["break_duration"], "45m");
    assert_eq!(day["work_duration"], "8h15m");
    assert_eq!(day["overtime"], "15m");

    let kinds: Vec<&str> = day["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["Begin", "End", "Begin", "End"]);

    let report = env.overtime();
    assert_eq!(report["total"], "+15m");
    assert_eq!(report["total_seconds"], 900);
    assert_eq!(report["daily_target"], "8h");
}

#[test]
fn test_explicit_kind_overrides_parity() {
    let env = TestEnv::new();
    env.cmd()
        .args(["punch", "--at", "2024-05-14 08:00", "--kind", "end"])
        .assert()
        .success()
        .stdout(contains("End #1"));

    env.cmd()
        .args(["punch", "--at", "2024-05-14 09:00", "--kind", "sideways"])
        .assert()
        .failure()
        .stderr(contains("Invalid event kind"));
}

#[test]
fn test_future_punch_is_rejected() {
    let env = TestEnv::new();
    env.cmd()
        .args(["punch", "--at", "2999-01-01 08:00"])
        .assert()
        .failure()
        .stderr(contains("future"));

    assert!(env.days().is_empty());
}

#[test]
fn test_edit_is_validated_and_recomputes() {
    let env = TestEnv::new();
    env.punch("2024-05-14 08:00");
    env.punch("2024-05-14 12:00");

    env.cmd()
        .args(["edit", "2", "--time", "07:00"])
        .assert()
        .failure()
        .stderr(contains("before previous entry"));

    env.cmd()
        .args(["edit", "2", "--time", "12:30"])
        .assert()
        .success()
        .stdout(contains("Event #2 is now End"));

    // 4h30m worked against an 8h target
    let report = env.overtime();
    assert_eq!(report["total"], "-3h30m");

    env.cmd()
        .args(["edit", "99", "--time", "10:00"])
        .assert()
        .failure()
        .stderr(contains("No event with id 99"));
}

#[test]
fn test_delete_event_and_day() {
    let env = TestEnv::new();
    env.punch("2024-05-14 08:00");
    env.punch("2024-05-14 12:00");
    env.punch("2024-05-15 08:00");

    env.cmd()
        .args(["del", "--event", "2", "--yes"])
        .assert()
        .success();
    assert_eq!(env.days().len(), 2);

    // declined confirmation keeps the day
    env.cmd()
        .args(["del", "--date", "2024-05-15"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));
    assert_eq!(env.days().len(), 2);

    env.cmd()
        .args(["del", "--date", "2024-05-15", "--yes"])
        .assert()
        .success();

    let days = env.days();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2024-05-14");

    env.cmd()
        .args(["del", "--date", "2024-05-15", "--yes"])
        .assert()
        .failure()
        .stderr(contains("No day found"));
}

#[test]
fn test_list_period_filter() {
    let env = TestEnv::new();
    env.punch("2024-04-30 08:00");
    env.punch("2024-05-02 08:00");
    env.punch("2024-05-03 08:00");

    let may = env.json(&["list", "--period", "2024-05", "--json"]);
    let dates: Vec<&str> = may
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["date"].as_str().unwrap())
        .collect();
    // most recent first
    assert_eq!(dates, ["2024-05-03", "2024-05-02"]);

    env.cmd()
        .args(["list", "--period", "May"])
        .assert()
        .failure()
        .stderr(contains("invalid period"));
}

#[test]
fn test_imported_balance_and_lock() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "--set-import", "10.5"])
        .assert()
        .success();

    let report = env.overtime();
    assert_eq!(report["total"], "+10h30m");
    assert_eq!(report["total_seconds"], 37800);

    env.cmd().args(["config", "--lock-import"]).assert().success();
    env.cmd()
        .args(["config", "--set-import", "3"])
        .assert()
        .failure()
        .stderr(contains("locked"));

    env.cmd()
        .args(["config", "--unlock-import", "--set-import", "3"])
        .assert()
        .success();
    assert_eq!(env.overtime()["total"], "+3h");
}

#[test]
fn test_config_rejects_invalid_values() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "--set-weekly", "0"])
        .assert()
        .failure()
        .stderr(contains("weekly hours"));

    env.cmd()
        .args(["config", "--set-break-policy", "lunchy"])
        .assert()
        .failure()
        .stderr(contains("unknown break policy"));

    env.cmd()
        .args(["config", "--set-refresh", "5", "--print"])
        .assert()
        .success()
        .stdout(contains("refresh_interval_seconds: 15"));

    env.cmd()
        .args(["config", "--set-carried", "9000000000000000"])
        .assert()
        .failure()
        .stderr(contains("carried-forward minutes"));

    env.cmd()
        .args(["config", "--set-import", "1e300"])
        .assert()
        .failure()
        .stderr(contains("imported overtime"));
}

#[test]
fn test_oversized_balances_in_config_file_are_clamped() {
    let env = TestEnv::new();
    std::fs::write(
        env.dir.path().join("punchclock.conf"),
        "carried_forward_minutes: 9000000000000000\nimported_overtime_hours: 1.0e300\n",
    )
    .unwrap();

    // 100000h carried plus 100000h imported
    let report = env.overtime();
    assert_eq!(report["total"], "+200000h");
}

#[test]
fn test_weekly_target_and_carried_forward() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "--set-weekly", "30", "--set-carried", "-90"])
        .assert()
        .success();

    env.punch("2024-05-14 08:00");
    env.punch("2024-05-14 14:00");

    // 6h worked, 30m break, 5h30m work against 6h → -30m, minus 90m carried
    let report = env.overtime();
    assert_eq!(report["daily_target"], "6h");
    assert_eq!(report["days"][0]["overtime"], "-30m");
    assert_eq!(report["total"], "-2h");
}

#[test]
fn test_gap_override_policy() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "--set-break-policy", "gap-override"])
        .assert()
        .success();

    for t in ["08:00", "12:30", "13:00", "17:30"] {
        env.punch(&format!("2024-05-14 {t}"));
    }

    let day = &env.days()[0];
    assert_eq!(day["break_duration"], "30m");
    assert_eq!(day["work_duration"], "9h");
}

#[test]
fn test_vacations() {
    let env = TestEnv::new();
    env.cmd()
        .args(["vacation", "add", "2024-08-05", "2024-08-16"])
        .assert()
        .success()
        .stdout(contains("12 days"));

    env.cmd()
        .args(["vacation", "add", "2024-08-16", "2024-08-05"])
        .assert()
        .failure()
        .stderr(contains("Invalid vacation"));

    let list = env.json(&["vacation", "list", "--json"]);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["start"], "2024-08-05");

    env.cmd()
        .args(["vacation", "edit", "1", "2024-08-05", "2024-08-09"])
        .assert()
        .success();
    assert_eq!(
        env.json(&["vacation", "list", "--json"])[0]["end"],
        "2024-08-09"
    );

    env.cmd().args(["vacation", "del", "1"]).assert().success();
    assert!(
        env.json(&["vacation", "list", "--json"])
            .as_array()
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_log_records_mutations() {
    let env = TestEnv::new();
    env.punch("2024-05-14 08:00");
    env.cmd()
        .args(["del", "--event", "1", "--yes"])
        .assert()
        .success();

    env.cmd()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("punch"))
        .stdout(contains("del"));
}
