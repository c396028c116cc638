/// End-to-end tests for `recent_cli::run` — argument parsing through to the
/// bytes written on stdout and stderr, against real temporary trees.
use clap::Parser;
use filetime::{set_file_mtime, FileTime};
use recent_cli::{run, Args, RunError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 2020-01-01T00:00:00Z
const OLD: i64 = 1_577_836_800;
/// 2099-01-01T00:00:00Z
const FUTURE: i64 = 4_070_908_800;

fn write_file(path: &Path, n: usize, mtime: i64) {
    fs::write(path, vec![0u8; n]).unwrap();
    set_file_mtime(path, FileTime::from_unix_time(mtime, 0)).unwrap();
}

/// `root/x` (old, 10 bytes) and `root/y` (new, 20 bytes).
fn make_temp_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_file(&tmp.path().join("x"), 10, OLD);
    write_file(&tmp.path().join("y"), 20, FUTURE);
    tmp
}

fn run_with(argv: &[&str]) -> (Result<(), RunError>, String, String) {
    let args = Args::try_parse_from(std::iter::once("recent").chain(argv.iter().copied())).unwrap();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = run(&args, &mut out, &mut err);
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

// ── Output ────────────────────────────────────────────────────────────────────

#[test]
fn prints_recent_paths() {
    let tmp = make_temp_tree();
    let root = tmp.path().to_str().unwrap();

    let (result, out, err) = run_with(&["-t", "2021-01-01 00:00:00", root]);

    result.unwrap();
    assert_eq!(out, format!("{}\n", tmp.path().join("y").display()));
    assert!(err.is_empty(), "no summary without -v");
}

#[test]
fn default_cutoff_is_now() {
    let tmp = make_temp_tree();
    let root = tmp.path().to_str().unwrap();

    // Only the file dated in the future is newer than "now".
    let (result, out, _) = run_with(&[root]);

    result.unwrap();
    assert_eq!(out.lines().count(), 1);
}

#[test]
fn quiet_verbose_prints_only_summary() {
    let tmp = make_temp_tree();
    let root = tmp.path().to_str().unwrap();

    let (result, out, err) = run_with(&["-q", "-v", "-d", "24h", root]);

    result.unwrap();
    assert!(out.is_empty());
    let lines: Vec<&str> = err.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("     total:        2 files"));
    assert!(lines[1].starts_with("    recent:        1 files (  50.00%)"));
    assert!(lines[1].ends_with(" seconds"));
}

#[test]
fn no_roots_is_an_empty_success() {
    let (result, out, err) = run_with(&["-v"]);

    result.unwrap();
    assert!(out.is_empty());
    assert!(err.contains("     total:        0 files"));
}

#[test]
fn json_report() {
    let tmp = make_temp_tree();
    let root = tmp.path().to_str().unwrap();

    let (result, out, _) = run_with(&["--json", "-t", "2021-01-01", "-f", "%Y-%m-%d", root]);

    result.unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["cutoff"], "2021-01-01T00:00:00Z");
    assert_eq!(value["totals"]["total_files"], 2);
    assert_eq!(value["totals"]["total_bytes"], 30);
    assert_eq!(value["totals"]["match_files"], 1);
    assert_eq!(value["totals"]["match_bytes"], 20);
    assert_eq!(
        value["paths"][0].as_str().unwrap(),
        tmp.path().join("y").to_str().unwrap()
    );
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn bad_time_exits_with_one() {
    let (result, out, _) = run_with(&["-t", "not a time", "."]);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().starts_with("error parsing time \"not a time\""));
    assert!(out.is_empty(), "nothing is scanned after a bad cutoff");
}

#[test]
fn bad_duration_exits_with_two() {
    let (result, _, _) = run_with(&["-d", "3 days", "."]);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().starts_with("error parsing duration \"3 days\""));
}

#[test]
fn time_wins_over_duration() {
    let tmp = make_temp_tree();
    let root = tmp.path().to_str().unwrap();

    // The bad duration is ignored entirely.
    let (result, out, _) = run_with(&["-t", "2019-01-01 00:00:00", "-d", "bogus", root]);

    result.unwrap();
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn broken_pipe_is_recognised() {
    let err = RunError::Output(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
    assert!(err.is_broken_pipe());
    assert_eq!(err.exit_code(), 3);
}

/// A closed stdout while writing the JSON document is the same clean exit.
#[test]
fn broken_pipe_during_json_is_recognised() {
    let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
    let err = RunError::Json(serde_json::Error::io(io_err));
    assert!(err.is_broken_pipe());

    let other = RunError::Json(serde_json::Error::io(std::io::Error::other("disk full")));
    assert!(!other.is_broken_pipe());
}

// ── Raw path bytes ────────────────────────────────────────────────────────────

/// A file name that is not valid UTF-8 is printed byte for byte.
#[cfg(unix)]
#[test]
fn non_utf8_names_are_printed_verbatim() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = TempDir::new().unwrap();
    let name = OsStr::from_bytes(b"caf\xe9");
    let path = tmp.path().join(name);
    if fs::write(&path, b"x").is_err() {
        // Filesystem refuses non-UTF-8 names; nothing to check here.
        return;
    }
    set_file_mtime(&path, FileTime::from_unix_time(FUTURE, 0)).unwrap();

    let args = Args::try_parse_from([OsStr::new("recent"), tmp.path().as_os_str()]).unwrap();
    let mut out = Vec::new();
    let mut err = Vec::new();
    run(&args, &mut out, &mut err).unwrap();

    let mut expected = path.as_os_str().as_bytes().to_vec();
    expected.push(b'\n');
    assert_eq!(out, expected);
}
