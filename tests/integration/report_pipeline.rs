use crate::common::{
    fake_node_cli_failing, fake_node_cli_history_failing, fake_node_cli_ok, make_stub_venv,
    processor_body_ok, test_config, write_script,
};
use ln_channel_report::cli::commands::report::execute;
use ln_channel_report::errors::AppError;
use tempfile::TempDir;

#[test]
fn channel_fetch_failure_short_circuits_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let lncli = fake_node_cli_failing(dir.path());
    let script = dir.path().join("process.py");
    let config = test_config(dir.path(), &lncli, &script);

    let err = execute(&config, false).unwrap_err();
    assert!(matches!(
        err,
        AppError::CommandFailed {
            step: "fetch channel list",
            status: 1
        }
    ));

    // Nothing past the first step ran
    assert!(!config.paths.channels_dump.exists());
    assert!(!config.paths.history_dump.exists());
    assert!(!config.paths.report_csv.exists());
}

#[test]
fn history_fetch_failure_aborts_before_processing() {
    let dir = TempDir::new().unwrap();
    let lncli = fake_node_cli_history_failing(dir.path());
    let script = dir.path().join("process.py");
    let config = test_config(dir.path(), &lncli, &script);

    let err = execute(&config, false).unwrap_err();
    assert!(matches!(
        err,
        AppError::CommandFailed {
            step: "fetch forwarding history",
            ..
        }
    ));

    // The abort is immediate: the channel dump is not cleaned up
    assert!(config.paths.channels_dump.exists());
    assert!(!config.paths.history_dump.exists());
    assert!(!config.paths.report_csv.exists());
}

#[test]
fn missing_environment_is_fatal_with_instructions() {
    let dir = TempDir::new().unwrap();
    let lncli = fake_node_cli_ok(dir.path());
    // No venv is created beside the script
    let script = dir.path().join("process.py");
    let config = test_config(dir.path(), &lncli, &script);

    let err = execute(&config, false).unwrap_err();
    assert!(matches!(err, AppError::MissingEnvironment { .. }));
    assert!(err.to_string().contains("python3 -m venv"));
    assert!(!config.paths.report_csv.exists());
}

#[test]
fn processing_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let lncli = fake_node_cli_ok(dir.path());
    let script = dir.path().join("process.py");
    make_stub_venv(dir.path(), "exit 1");
    let config = test_config(dir.path(), &lncli, &script);

    let err = execute(&config, false).unwrap_err();
    assert!(matches!(
        err,
        AppError::CommandFailed {
            step: "generate report",
            status: 1
        }
    ));

    // Cleanup only runs on the success path; the dumps survive a failed run
    assert!(config.paths.channels_dump.exists());
    assert!(config.paths.history_dump.exists());
    assert!(!config.paths.report_csv.exists());
}

#[test]
fn successful_run_leaves_only_the_report() {
    let dir = TempDir::new().unwrap();
    let lncli = fake_node_cli_ok(dir.path());
    let script = dir.path().join("process.py");
    make_stub_venv(dir.path(), &processor_body_ok());
    let config = test_config(dir.path(), &lncli, &script);

    execute(&config, false).unwrap();

    // Transient dumps are gone, the report remains
    assert!(!config.paths.channels_dump.exists());
    assert!(!config.paths.history_dump.exists());
    assert!(config.paths.report_csv.exists());

    let report = std::fs::read_to_string(&config.paths.report_csv).unwrap();
    assert!(report.starts_with("PeerAlias,"));
    assert!(report.contains("alice"));
}

#[test]
fn processor_receives_the_dump_and_output_paths() {
    let dir = TempDir::new().unwrap();
    let lncli = fake_node_cli_ok(dir.path());
    let script = dir.path().join("process.py");
    // Record the arguments the interpreter was called with
    let args_log = dir.path().join("args.log");
    make_stub_venv(
        dir.path(),
        &format!(
            r#"printf '%s\n' "$1" "$2" "$3" "$4" > {}
printf 'h1,h2,h3,h4,h5,h6,h7,h8\n' > "$4"
exit 0"#,
            args_log.display()
        ),
    );
    let config = test_config(dir.path(), &lncli, &script);

    execute(&config, false).unwrap();

    let logged = std::fs::read_to_string(&args_log).unwrap();
    let lines: Vec<&str> = logged.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], script.display().to_string());
    assert_eq!(lines[1], config.paths.channels_dump.display().to_string());
    assert_eq!(lines[2], config.paths.history_dump.display().to_string());
    assert_eq!(lines[3], config.paths.report_csv.display().to_string());
}

#[test]
fn display_failure_does_not_fail_the_run() {
    let dir = TempDir::new().unwrap();
    let lncli = fake_node_cli_ok(dir.path());
    let script = dir.path().join("process.py");
    // Processor "succeeds" but writes a malformed report
    make_stub_venv(dir.path(), r#"printf 'A,B\nx,y\n' > "$4"; exit 0"#);
    let config = test_config(dir.path(), &lncli, &script);

    // Display cannot parse the report, but the pipeline still succeeds and
    // cleanup still runs
    execute(&config, false).unwrap();
    assert!(!config.paths.channels_dump.exists());
    assert!(!config.paths.history_dump.exists());
}

#[test]
fn missing_node_cli_binary_is_a_launch_error() {
    let dir = TempDir::new().unwrap();
    let lncli = dir.path().join("does-not-exist");
    let script = dir.path().join("process.py");
    let config = test_config(dir.path(), &lncli, &script);

    let err = execute(&config, false).unwrap_err();
    assert!(matches!(
        err,
        AppError::CommandLaunch {
            step: "fetch channel list",
            ..
        }
    ));
}

#[test]
fn fetch_writes_node_output_to_the_dump_files() {
    let dir = TempDir::new().unwrap();
    let lncli = write_script(
        &dir.path().join("lncli"),
        r#"case "$1" in
  listchannels) echo '{"channels": [{"peer_alias": "alice"}]}' ;;
  fwdinghistory) echo '{"forwarding_events": []}' ;;
esac
exit 0"#,
    );
    let script = dir.path().join("process.py");
    make_stub_venv(dir.path(), &processor_body_ok());
    let config = test_config(dir.path(), &lncli, &script);

    execute(&config, false).unwrap();
    assert!(config.paths.report_csv.exists());
}
