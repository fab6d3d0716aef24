//! End-to-end tests for the `ember` binary.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::path::PathBuf;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct Script {
    _dir: TempDir,
    path: PathBuf,
}

fn script(source: &str) -> Script {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.js");
    std::fs::write(&path, source).unwrap();
    Script { _dir: dir, path }
}

fn ember(args: &[&str], script: Option<&Script>) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ember"));
    command.args(args);
    if let Some(script) = script {
        command.arg(&script.path);
    }
    command.env_remove("EMBER_LOG").env_remove("RUST_LOG");
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn run_prints_console_output() {
    let file = script(
        "function greet(name) { return 'hello ' + name; }
         console.log(greet('ember'), 1 + 2, [1, 'two']);",
    );
    let output = ember(&["run"], Some(&file));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "hello ember 3 [ 1, 'two' ]\n");
}

#[test]
fn run_exports_prints_module_exports() {
    let file = script("exports.answer = 6 * 7; exports.name = 'deep';");
    let output = ember(&["run", "--exports"], Some(&file));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "{ answer: 42, name: 'deep' }\n");
}

#[test]
fn uncaught_throw_fails_with_a_report() {
    let file = script("console.log('before');\nthrow 'boom';\n");
    let output = ember(&["run"], Some(&file));
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "before\n");
    let err = stderr(&output);
    assert!(err.contains("E6020"), "stderr: {err}");
    assert!(err.contains("Uncaught boom"), "stderr: {err}");
}

#[test]
fn strict_flag_rejects_implicit_globals() {
    let file = script("total = 1;\nconsole.log(total);");
    let output = ember(&["run"], Some(&file));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1\n");

    let output = ember(&["run", "--strict"], Some(&file));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ReferenceError: total is not defined"));
}

#[test]
fn max_depth_limits_recursion() {
    let file = script("function down(n) { return n === 0 ? 0 : down(n - 1); } down(100);");
    let output = ember(&["run", "--max-depth=1000"], Some(&file));
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = ember(&["run", "--max-depth=10"], Some(&file));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("RangeError"));
}

#[test]
fn check_reports_syntax_errors() {
    let file = script("var a = ;\n");
    let output = ember(&["check"], Some(&file));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("syntax error"));

    let file = script("var a = 1;\nfunction f() {}\n");
    let output = ember(&["check"], Some(&file));
    assert!(output.status.success());
    assert!(stdout(&output).ends_with(": ok (2 statement(s))\n"));
}

#[test]
fn check_does_not_run_the_program() {
    let file = script("console.log('side effect'); throw 1;");
    let output = ember(&["check"], Some(&file));
    assert!(output.status.success());
    assert!(!stdout(&output).contains("side effect"));
}

#[test]
fn lex_and_parse_dump_the_front_end() {
    let file = script("let x = 1;");
    let output = ember(&["lex"], Some(&file));
    assert!(output.status.success());
    assert!(stdout(&output).contains("(6 tokens):"));

    let output = ember(&["parse"], Some(&file));
    assert!(output.status.success());
    assert!(stdout(&output).contains("  VariableDeclaration @ 0..10\n"));
}

#[test]
fn missing_file_is_reported() {
    let output = ember(&["run", "/nonexistent/ember/main.js"], None);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "error: cannot find file '/nonexistent/ember/main.js'\n"
    );
}

#[test]
fn unknown_command_and_option() {
    let output = ember(&["frobnicate"], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown command: frobnicate"));

    let file = script("1;");
    let output = ember(&["run", "--turbo"], Some(&file));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown option '--turbo'"));
}

#[test]
fn no_arguments_prints_usage() {
    let output = ember(&[], None);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Ember scripting language"));
}
