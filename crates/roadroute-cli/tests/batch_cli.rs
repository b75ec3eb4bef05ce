use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures")
        .join(name)
        .canonicalize()
        .expect("fixture road network present")
}

fn cli(network: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("roadroute");
    cmd.env("RUST_LOG", "error")
        .arg("--network")
        .arg(fixture_path(network));
    cmd
}

#[test]
fn triangle_request_prints_waypoints_and_end_marker() {
    cli("triangle_roads.txt")
        .arg("batch")
        .write_stdin("R 0 0 100000 100000\nA\nA\nA\n")
        .assert()
        .success()
        .stdout("N 3\nW (0,0)\nW (100000,0)\nW (100000,100000)\nE\n");
}

#[test]
fn non_ack_lines_stall_until_ack() {
    cli("triangle_roads.txt")
        .arg("batch")
        .write_stdin("R 0 0 100000 0\nwait\nA\nB\nA\n")
        .assert()
        .success()
        .stdout("N 2\nW (0,0)\nW (100000,0)\nE\n");
}

#[test]
fn unreachable_destination_prints_empty_response() {
    cli("small_city_roads.txt")
        .arg("batch")
        .write_stdin("R 5350000 -11300000 5350000 -11350000\n")
        .assert()
        .success()
        .stdout("N 0\nE\n");
}

#[test]
fn invalid_request_fails_without_output() {
    cli("triangle_roads.txt")
        .arg("batch")
        .write_stdin("X 0 0 100000 100000\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid request"));
}

#[test]
fn missing_network_file_is_reported() {
    let mut cmd = cargo_bin_cmd!("roadroute");
    cmd.env("RUST_LOG", "error")
        .arg("--network")
        .arg("definitely-missing-roads.txt")
        .arg("batch")
        .write_stdin("R 0 0 0 0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("road network not found"));
}

#[test]
fn network_path_can_come_from_environment() {
    let mut cmd = cargo_bin_cmd!("roadroute");
    cmd.env("RUST_LOG", "error")
        .env("ROADROUTE_NETWORK", fixture_path("triangle_roads.txt"))
        .arg("batch")
        .write_stdin("R 100000 100000 100000 100000\nA\n")
        .assert()
        .success()
        .stdout("N 1\nW (100000,100000)\nE\n");
}
