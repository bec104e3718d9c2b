use predicates::str::contains;

mod common;
use common::TestRoom;

#[test]
fn init_creates_data_dirs_and_logs_operation() {
    let room = TestRoom::new();

    room.rsal()
        .args(["--test", "init"])
        .assert()
        .success()
        .stdout(contains("rsal initialization completed!"));

    assert!(room.logs_dir().is_dir());
    assert!(room.data.path().join("attendance").is_dir());
    assert!(!room.home.path().join(".rsal").join("rsal.conf").exists());

    room.rsal()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"));
}

#[test]
fn session_taps_reach_internal_log() {
    let room = TestRoom::new();
    room.rsal().args(["--test", "init"]).assert().success();
    room.rsal().write_stdin("1234567890\nq\n").assert().success();

    room.rsal()
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("tap"))
        .stdout(contains("1234567890"));
}

#[test]
fn config_print_shows_defaults() {
    let room = TestRoom::new();

    room.rsal()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("timezone: Europe/Oslo"))
        .stdout(contains("day_start_hour: 5"));
}

#[test]
fn invalid_config_file_is_an_error() {
    let room = TestRoom::new();
    let dir = room.home.path().join(".rsal");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("rsal.conf"),
        "data_dir: /tmp/x\ndatabase: /tmp/x/db\nday_start_hour: 30\n",
    )
    .unwrap();

    room.rsal()
        .arg("users")
        .assert()
        .failure()
        .stderr(contains("day_start_hour"));
}
