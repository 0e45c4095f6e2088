// tests/cli.rs
use garden_robot::{generate, parse};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const GARDEN: &str = "A=30\nB=10\nC=\n\nA.B\n$.C\n";

const SWAP: &str = "move-north\nmove-east 2\npick-up\nmove-south\nput-down\nmove-north\n\
move-west 2\npick-up\nmove-east 2\nput-down\nmove-south\npick-up\nmove-north\nmove-west 2\n\
put-down\n";

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn garden_robot(args: &[&str], garden: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_garden-robot"))
        .args(args)
        .arg(garden)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_sorted_run_succeeds() {
    let fx = Fixture::new();
    let garden = fx.file("garden.txt", GARDEN);
    let input = fx.file("commands.txt", SWAP);

    let output = garden_robot(&["--no-delay", "--input", input.to_str().unwrap()], &garden);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("A: 10\nB: 30\nC: empty"), "{out}");
    assert!(
        out.contains("Success! The garden is tidy. The robot executed 19 commands."),
        "{out}"
    );
}

#[test]
fn test_json_summary() {
    let fx = Fixture::new();
    let garden = fx.file("garden.txt", GARDEN);
    let input = fx.file("commands.txt", SWAP);

    let output = garden_robot(&["--json", "--input", input.to_str().unwrap()], &garden);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), r#"{"success":true,"commandCount":19}"#);
}

#[test]
fn test_unsorted_run_reports_failure() {
    let fx = Fixture::new();
    let garden = fx.file("garden.txt", GARDEN);
    let input = fx.file("commands.txt", "move-north\n");

    let output = garden_robot(&["--no-delay", "--input", input.to_str().unwrap()], &garden);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Failure! The objects are not sorted."));

    let output = garden_robot(&["--json", "--input", input.to_str().unwrap()], &garden);
    assert_eq!(stdout(&output).trim(), r#"{"success":false,"commandCount":1}"#);
}

#[test]
fn test_exit_codes_by_error_class() {
    let fx = Fixture::new();
    let garden = fx.file("garden.txt", GARDEN);

    let unknown = fx.file("unknown.txt", "springen\n");
    let output = garden_robot(&["--no-delay", "--input", unknown.to_str().unwrap()], &garden);
    assert_eq!(output.status.code(), Some(1), "Unknown command is malformed input");

    let repeat = fx.file("repeat.txt", "move-east zwei\n");
    let output = garden_robot(&["--no-delay", "--input", repeat.to_str().unwrap()], &garden);
    assert_eq!(output.status.code(), Some(1));

    let off_map = fx.file("off_map.txt", "move-west\n");
    let output = garden_robot(&["--no-delay", "--input", off_map.to_str().unwrap()], &garden);
    assert_eq!(output.status.code(), Some(2), "Leaving the map is a rule violation");
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot move out of map"));

    let bad_garden = fx.file("bad.txt", "A=1\nB\n\nA$\n");
    let output = garden_robot(&["--no-delay", "--input", off_map.to_str().unwrap()], &bad_garden);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));

    let missing = fx.path("missing.txt");
    let output = garden_robot(&["--no-delay", "--input", off_map.to_str().unwrap()], &missing);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_usage_errors() {
    let fx = Fixture::new();
    let garden = fx.file("garden.txt", GARDEN);
    let input = fx.file("commands.txt", SWAP);

    let output = garden_robot(
        &["--no-delay", "--step", "--input", input.to_str().unwrap()],
        &garden,
    );
    assert_eq!(output.status.code(), Some(1));

    let output = garden_robot(&["--step"], &garden);
    assert_eq!(output.status.code(), Some(1), "--step needs --input");

    let output = Command::new(env!("CARGO_BIN_EXE_garden-robot"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1), "Garden file is required");
}

#[test]
fn test_step_mode_warns_when_stdin_closes() {
    let fx = Fixture::new();
    let garden = fx.file("garden.txt", GARDEN);
    let input = fx.file("commands.txt", "move-north\nmove-east\n");

    let output = Command::new(env!("CARGO_BIN_EXE_garden-robot"))
        .args(["--step", "--input", input.to_str().unwrap()])
        .arg(&garden)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "Run finishes without pausing");
    assert!(stdout(&output).contains("Failure! The objects are not sorted."));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("stdin closed").count(),
        1,
        "Warned once about the closed stdin: {stderr}"
    );
}

#[test]
fn test_generate_writes_seeded_garden() {
    let fx = Fixture::new();
    let target = fx.path("generated.txt");

    let output = garden_robot(
        &["--generate", "--size", "8x6", "--area-count", "5", "--seed", "7"],
        &target,
    );
    assert_eq!(output.status.code(), Some(0));

    let text = std::fs::read_to_string(&target).unwrap();
    assert_eq!(text, generate(8, 6, 5, 7).unwrap());
    assert_eq!(parse(&text).unwrap().area_count(), 5);
}

#[test]
fn test_generate_random_parameters() {
    let fx = Fixture::new();
    let target = fx.path("random.txt");

    let output = garden_robot(
        &["--generate", "--size", "random", "--area-count", "random", "--seed", "1"],
        &target,
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(parse(&std::fs::read_to_string(&target).unwrap()).is_ok());
}

#[test]
fn test_generate_rejects_bad_parameters() {
    let fx = Fixture::new();
    let target = fx.path("never.txt");

    let output = garden_robot(
        &["--generate", "--size", "200x6", "--area-count", "5"],
        &target,
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!target.exists(), "Nothing is written for invalid parameters");

    let output = garden_robot(
        &["--generate", "--size", "4x4", "--area-count", "20"],
        &target,
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!target.exists());

    let output = garden_robot(&["--generate", "--size", "8by6"], &target);
    assert_eq!(output.status.code(), Some(1));
}
