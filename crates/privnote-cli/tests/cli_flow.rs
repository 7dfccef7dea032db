use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_privnote"))
}

fn privnote(config_home: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("PRIVNOTE_PASSWORD")
        .env_remove("PRIVNOTE_CONFIG")
        .env_remove("PRIVNOTE_ORIGIN")
        .env_remove("PRIVNOTE_LOG")
        .stdin(Stdio::null());
    cmd
}

fn run(config_home: &Path, args: &[&str]) -> Output {
    privnote(config_home)
        .args(args)
        .output()
        .expect("run privnote")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for command in ["send", "read", "link", "config", "completions"] {
        assert!(text.contains(command), "help should mention {}", command);
    }
}

#[test]
fn test_link_json_does_not_print_secret() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["link", "https://privnote.com/abc123#Ab3dE6gH9", "--json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(!text.contains("Ab3dE6gH9"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["identifier"], "abc123");
    assert_eq!(value["url"], "https://privnote.com/abc123");
    assert_eq!(value["has_secret"], true);
}

#[test]
fn test_link_for_other_host_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["link", "https://example.com/abc123#x"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Error:"));
}

#[test]
fn test_send_rejects_long_duration_before_network() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["send", "hello", "--duration", "721"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("720"));
}

#[test]
fn test_send_rejects_bad_notify_email() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["send", "hello", "--notify-email", "not-an-email"],
    );
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Notify email is incorrect"));
}

#[test]
fn test_read_without_password_fails_before_fetching() {
    let dir = tempfile::tempdir().unwrap();
    // Port 9 would refuse the connection; auth must fail first.
    let output = run(
        dir.path(),
        &[
            "--origin",
            "http://127.0.0.1:9",
            "read",
            "http://127.0.0.1:9/abc123",
            "--no-input",
        ],
    );
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("PRIVNOTE_PASSWORD"));
}

#[test]
fn test_send_to_unreachable_origin_is_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["--origin", "http://127.0.0.1:9", "send", "hello"],
    );
    assert_eq!(output.status.code(), Some(8));
}

#[test]
fn test_bad_origin_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--origin", "ftp://privnote.com", "link", "abc"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();

    let init = run(dir.path(), &["config", "init"]);
    assert!(init.status.success(), "stderr: {}", stderr(&init));
    let path = dir.path().join("privnote").join("config.toml");
    assert!(path.exists());

    let again = run(dir.path(), &["config", "init"]);
    assert_eq!(again.status.code(), Some(4));

    let forced = run(dir.path(), &["config", "init", "--force"]);
    assert!(forced.status.success());

    let show = run(dir.path(), &["config", "show"]);
    assert!(show.status.success());
    let text = stdout(&show);
    assert!(text.contains("[service]"));
    assert!(text.contains("https://privnote.com"));
    assert!(text.contains("[defaults]"));
}

#[test]
fn test_config_defaults_feed_send_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("privnote").join("config.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[defaults]\nnotify_email = \"broken\"\n").unwrap();

    let output = run(dir.path(), &["send", "hello"]);
    assert_eq!(output.status.code(), Some(4));
}
