use std::path::PathBuf;
use std::process::{Command, Output};

fn write_input(name: &str, contents: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    std::fs::write(&path, contents).expect("writing test input");
    path
}

fn day24(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_day24"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("running day24")
}

const EXAMPLE: &str = "19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3
";

#[test]
fn prints_result() {
    let path = write_input("cli_example.txt", EXAMPLE);
    let out = day24(&[path.to_str().unwrap()]);

    assert!(out.status.success(), "{:?}", out);
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Loaded 5 hailstones\nSolution: [24, 13, 10, -3, 1, 2]\nResult: 47\n"
    );
}

#[test]
fn prints_crossings_with_test_area() {
    let path = write_input("cli_example_area.txt", EXAMPLE);
    let out = day24(&[path.to_str().unwrap(), "--test-area", "7", "27"]);

    assert!(out.status.success(), "{:?}", out);
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().nth(1), Some("Crossings: 2"));
    assert_eq!(stdout.lines().last(), Some("Result: 47"));
}

#[test]
fn puzzle_area_has_no_crossings_for_the_example() {
    let path = write_input("cli_example_puzzle_area.txt", EXAMPLE);
    let out = day24(&[path.to_str().unwrap(), "--puzzle-area"]);

    assert!(out.status.success(), "{:?}", out);
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout.lines().nth(1), Some("Crossings: 0"));
}

#[test]
fn zero_sample_is_a_usage_error() {
    let path = write_input("cli_zero_sample.txt", EXAMPLE);
    let out = day24(&[path.to_str().unwrap(), "--sample", "0"]);

    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn no_solution_exits_with_one() {
    let path = write_input(
        "cli_contradictory.txt",
        "19, 13, 30 @ -2, 1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -3, -2, 1
12, 31, 28 @ -1, -2, 1
20, 19, 15 @ 1, -5, -3
",
    );
    let out = day24(&[path.to_str().unwrap()]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("No solutions found"), "{}", stderr);
}

#[test]
fn too_few_hailstones_exits_with_one() {
    let path = write_input("cli_three.txt", EXAMPLE);
    let out = day24(&[path.to_str().unwrap(), "--sample", "3"]);

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Multiple solutions found"), "{}", stderr);
}

#[test]
fn bad_line_is_reported() {
    let path = write_input("cli_bad.txt", "19, 13, 30 @ -2, 1\n");
    let out = day24(&[path.to_str().unwrap()]);

    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("line 1"), "{}", stderr);
}

#[test]
fn missing_file_fails() {
    let out = day24(&["this/file/does/not/exist.txt"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_argument_fails() {
    let out = day24(&[]);
    assert!(!out.status.success());
}
