use std::ffi::OsStr;
use std::process::{Command, Output};

fn run_with<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_reminder-count"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn unknown_command_prints_usage_line() {
    let output = run_with(["foo"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        ["error: unknown command 'foo'. Use: count, list, complete <id>"]
    );
}

#[test]
fn complete_without_id_prints_error_line() {
    let output = run_with(["complete"]);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["error: missing reminder id"]);
}

#[test]
fn unrecognised_flag_prints_usage_line() {
    let output = run_with(["--bogus"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("error: unknown command '--bogus'"));
}

#[cfg(unix)]
#[test]
fn non_utf8_argument_still_prints_one_line() {
    use std::os::unix::ffi::OsStrExt;

    let output = run_with([OsStr::from_bytes(b"\xfflist")]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1, "stdout: {:?}", lines);
    assert!(lines[0].starts_with("error: unknown command '"));
    assert!(lines[0].ends_with("list'. Use: count, list, complete <id>"));
}
