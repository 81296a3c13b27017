use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use similar::{ChangeTag, TextDiff};

/// Golden cases: snapshot name and the command line after the source flags.
const CASES: &[(&str, &[&str])] = &[
    ("week_default", &["week"]),
    ("week_previous", &["week", "--weeks", "-1"]),
    ("week_hamburg", &["week", "--search", "hamburg"]),
    ("week_berlin_tz", &["--tz", "Europe/Berlin", "week"]),
    ("stations_all", &["stations"]),
    ("stations_none", &["stations", "munich"]),
    (
        "booking_joined",
        &["booking", "--station-id", "2", "--booking-id", "2"],
    ),
    (
        "booking_unknown_station",
        &["booking", "--station-id", "2", "--booking-id", "4"],
    ),
    (
        "move_end",
        &["move", "--booking-id", "1", "--edge", "end", "--to", "2023-04-03"],
    ),
    (
        "move_start_past_end",
        &["move", "--booking-id", "3", "--edge", "start", "--to", "2023-04-04"],
    ),
];

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture_path() -> PathBuf {
    project_root().join("fixtures").join("stations.json")
}

fn golden_dir() -> PathBuf {
    project_root().join("golden")
}

fn update_golden() -> bool {
    std::env::var("UPDATE_GOLDEN").is_ok()
}

fn diff_strings(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        out.push_str(&format!("{sign}{change}"));
    }
    out
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_stationcal"))
        .arg("--fixture")
        .arg(fixture_path())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute stationcal")
}

#[test]
fn golden_text_output() {
    let golden = golden_dir();

    for (name, args) in CASES {
        let golden_path = golden.join(format!("{name}.txt"));
        let output = run(args);

        assert!(
            output.status.success(),
            "stationcal failed for {}: {}",
            name,
            String::from_utf8_lossy(&output.stderr)
        );

        let actual = String::from_utf8(output.stdout).expect("Output is not valid UTF-8");

        if update_golden() {
            fs::create_dir_all(&golden).ok();
            fs::write(&golden_path, &actual)
                .unwrap_or_else(|e| panic!("Failed to write golden file {golden_path:?}: {e}"));
            eprintln!("Updated golden file: {golden_path:?}");
            continue;
        }

        let expected = fs::read_to_string(&golden_path).unwrap_or_else(|e| {
            panic!(
                "Golden file {golden_path:?} not found: {e}\n\
                 Hint: Run with UPDATE_GOLDEN=1 to generate golden files"
            )
        });

        if actual != expected {
            let diff = diff_strings(&expected, &actual);
            panic!(
                "Golden test mismatch for {name}:\n\n\
                 {diff}\n\n\
                 Run with UPDATE_GOLDEN=1 to refresh snapshots"
            );
        }
    }
}

#[test]
fn week_json_lists_seven_days() {
    let output = run(&["week", "--output-format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["station"]["name"], "Berlin Station");
    assert_eq!(json["anchor"], "2023-04-01");

    let days = json["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["day"]["key"], "2023-04-01");
    assert_eq!(days[0]["entries"][0]["edge"], "start");
    assert_eq!(days[0]["entries"][0]["booking"]["customerName"], "John Doe");
}

#[test]
fn move_json_reports_new_dates() {
    let output = run(&[
        "move",
        "--booking-id",
        "2",
        "--edge",
        "start",
        "--to",
        "2023-04-07",
        "--search",
        "hamburg",
        "--output-format",
        "json",
    ]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["edge"], "start");
    assert_eq!(json["to"], "2023-04-07");
    assert_eq!(json["persisted"], true);
    assert_eq!(json["booking"]["startDate"], "2023-04-07T00:00:00Z");
    assert_eq!(json["booking"]["endDate"], "2023-04-10T00:00:00Z");
}

#[test]
fn invalid_edge_is_input_error() {
    let output = run(&[
        "move",
        "--booking-id",
        "1",
        "--edge",
        "middle",
        "--to",
        "2023-04-03",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid edge 'middle'"));
}

#[test]
fn missing_booking_json_envelope() {
    let output = run(&[
        "booking",
        "--station-id",
        "1",
        "--booking-id",
        "404",
        "--output-format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(3));

    // the envelope follows any log lines on stderr
    let stderr = String::from_utf8_lossy(&output.stderr);
    let start = stderr.find("{\n").expect("no JSON envelope on stderr");
    let json: serde_json::Value = serde_json::from_str(&stderr[start..]).unwrap();
    assert_eq!(json["error"], "Booking not found");
    assert_eq!(json["exit_code"], 3);
}

#[test]
fn unknown_output_format_is_input_error() {
    let output = run(&["stations", "--output-format", "yaml"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn out_of_range_fixture_fails_cleanly() {
    let path = std::env::temp_dir().join(format!(
        "stationcal-far-future-{}.json",
        std::process::id()
    ));
    fs::write(
        &path,
        r#"{
            "stations": [{ "id": "1", "name": "Tokyo Station" }],
            "bookings": {
                "1": [{
                    "id": "1",
                    "customerName": "Far Future",
                    "startDate": "+262142-12-31T20:00:00",
                    "endDate": "+262142-12-31T21:00:00",
                    "pickupReturnStationId": "1"
                }]
            }
        }"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_stationcal"))
        .arg("--fixture")
        .arg(&path)
        .args(["--tz", "Asia/Tokyo", "week"])
        .output()
        .expect("Failed to execute stationcal");
    fs::remove_file(&path).ok();

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside years"), "{stderr}");
    assert!(!stderr.contains("panicked"), "{stderr}");
}
