use std::io::Write;
use std::path::Path;
use std::time::Duration;

use clap::Parser;
use lastout_cli::cli::{LogLevelArg, TerminatorArg};
use lastout_cli::{Cli, Settings, run};
use lastout_core::config::Config;
use lastout_core::{Error, Extraction, SourceSpec, Terminator};

const START: &str = "\x1b]133;B\x07";
const END: &str = "\x1b]133;D;";

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["lastout"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("valid arguments")
}

fn capture(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn path_arg(file: &tempfile::NamedTempFile) -> String {
    file.path().to_string_lossy().to_string()
}

// ============================================================================
// Argument Parsing Tests
// ============================================================================

#[test]
fn test_parse_file_source() {
    let args = cli(&["--file", "/tmp/session.log"]);
    assert_eq!(
        args.source_spec(),
        Some(SourceSpec::File("/tmp/session.log".into()))
    );
}

#[test]
fn test_parse_sources() {
    assert_eq!(cli(&["--stdin"]).source_spec(), Some(SourceSpec::Stdin));
    assert_eq!(
        cli(&["--exec", "cat log"]).source_spec(),
        Some(SourceSpec::Command("cat log".to_string()))
    );
    assert_eq!(
        cli(&["--tmux-pane", "%2"]).source_spec(),
        Some(SourceSpec::Tmux(Some("%2".to_string())))
    );
    assert_eq!(cli(&[]).source_spec(), None);
}

#[test]
fn test_parse_conflicting_sources() {
    assert!(Cli::try_parse_from(["lastout", "--file", "a.log", "--stdin"]).is_err());
    assert!(Cli::try_parse_from(["lastout", "--exec", "x", "--tmux-pane", "%1"]).is_err());
}

#[test]
fn test_parse_attach() {
    let args = cli(&["--attach", "--tmux-pane", "%5"]);
    assert!(args.attach);
    assert_eq!(args.source_spec(), Some(SourceSpec::Tmux(Some("%5".to_string()))));
    assert!(Cli::try_parse_from(["lastout", "--attach", "--file", "a.log"]).is_err());
    assert!(Cli::try_parse_from(["lastout", "--attach", "--json"]).is_err());
}

#[test]
fn test_parse_enums() {
    let args = cli(&["--terminator", "st", "--log-level", "debug", "--json"]);
    assert_eq!(args.terminator, Some(TerminatorArg::St));
    assert_eq!(args.log_level, Some(LogLevelArg::Debug));
    assert_eq!(LogLevelArg::Debug.as_directive(), "debug");
    assert!(args.json);
    assert!(Cli::try_parse_from(["lastout", "--terminator", "nul"]).is_err());
}

// ============================================================================
// Settings Tests
// ============================================================================

#[test]
fn test_settings_cli_overrides_config() {
    let config = Config::parse(
        "terminator = \"st\"\nfetch_timeout_ms = 10\n[source]\nkind = \"stdin\"\n",
        Path::new("c.toml"),
    )
    .unwrap();

    let settings = Settings::resolve(
        &cli(&["--exec", "cat x", "--terminator", "bel", "--timeout-ms", "99"]),
        &config,
    )
    .unwrap();

    assert_eq!(settings.spec, SourceSpec::Command("cat x".to_string()));
    assert_eq!(settings.markers.terminator(), Terminator::Bel);
    assert_eq!(settings.timeout, Duration::from_millis(99));
}

#[test]
fn test_settings_fall_back_to_config() {
    let config = Config::parse(
        "terminator = \"st\"\nfetch_timeout_ms = 10\n[source]\nkind = \"stdin\"\n",
        Path::new("c.toml"),
    )
    .unwrap();

    let settings = Settings::resolve(&cli(&[]), &config).unwrap();
    assert_eq!(settings.spec, SourceSpec::Stdin);
    assert_eq!(settings.markers.terminator(), Terminator::St);
    assert_eq!(settings.timeout, Duration::from_millis(10));
    assert_eq!(settings.pane_log_dir, config.pane_log_dir());
    assert!(!settings.json);
}

// ============================================================================
// Run Tests
// ============================================================================

#[tokio::test]
async fn test_run_writes_output_verbatim() {
    let file = capture(&format!(
        "$ ls\n{START}old\n{END}0\x07\n$ echo hello\n{START}hello\n{END}0\x07\n$ "
    ));
    let mut out = Vec::new();

    let result = run(&cli(&["--file", &path_arg(&file)]), &Config::default(), &mut out)
        .await
        .unwrap();

    assert!(result.is_found());
    // No trailing newline is added.
    assert_eq!(out, b"hello");
}

#[tokio::test]
async fn test_run_empty_block_writes_nothing_but_succeeds() {
    let file = capture(&format!("{START}  \n{END}0\x07\n"));
    let mut out = Vec::new();

    let result = run(&cli(&["--file", &path_arg(&file)]), &Config::default(), &mut out)
        .await
        .unwrap();

    assert_eq!(result.text(), Some(""));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_run_not_found_is_silent_success() {
    let file = capture(&format!("$ sleep 60\n{START}zzz\n"));
    let mut out = Vec::new();

    let result = run(&cli(&["--file", &path_arg(&file)]), &Config::default(), &mut out)
        .await
        .unwrap();

    assert_eq!(result, Extraction::NotFound);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_run_no_session_fails_without_output() {
    let mut out = Vec::new();

    let err = run(
        &cli(&["--file", "/no/such/lastout-capture.log"]),
        &Config::default(),
        &mut out,
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::NoSession { .. })
    ));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_run_json_output() {
    let file = capture(&format!("{START}built\n{END}2\x07\n"));
    let mut out = Vec::new();

    run(
        &cli(&["--file", &path_arg(&file), "--json"]),
        &Config::default(),
        &mut out,
    )
    .await
    .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["output"], "built");
    assert_eq!(value["exit_code"], 2);
}

#[tokio::test]
async fn test_run_st_terminator() {
    let file = capture("\x1b]133;B\x1b\\st output\n\x1b]133;D;0\x1b\\\n");
    let mut out = Vec::new();

    run(
        &cli(&["--file", &path_arg(&file), "--terminator", "st"]),
        &Config::default(),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(out, b"st output");
}

#[tokio::test]
async fn test_run_source_from_config() {
    let file = capture(&format!("{START}configured\n{END}0\x07\n"));
    let config = Config::parse(
        &format!(
            "[source]\nkind = \"file\"\npath = {:?}\n",
            file.path().to_string_lossy()
        ),
        Path::new("c.toml"),
    )
    .unwrap();
    let mut out = Vec::new();

    run(&cli(&[]), &config, &mut out).await.unwrap();
    assert_eq!(out, b"configured");
}

#[cfg(unix)]
#[tokio::test]
async fn test_run_exec_failure_is_not_fatal() {
    let mut out = Vec::new();

    let result = run(&cli(&["--exec", "exit 4"]), &Config::default(), &mut out)
        .await
        .unwrap();

    assert_eq!(result, Extraction::NotFound);
    assert!(out.is_empty());
}
