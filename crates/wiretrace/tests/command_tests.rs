mod common;

use common::{json_response, ScriptedTransport};
use std::path::{Path, PathBuf};
use wiretrace::api::ApiClient;
use wiretrace::commands::{execute_inspect, execute_run, validate_run_args, InspectArgs, RunArgs};
use wiretrace::scenario::{load_scenario, play_scenario, Scenario};
use wiretrace::session::{Credentials, Session};

const SCENARIO: &str = r#"
name = "profile"

[[step]]
path = "/users/alice"

[[step]]
method = "PATCH"
path = "/user"
body = '{"bio": "Edited by wiretrace"}'

[[step]]
method = "DELETE"
path = "/user/following/alice"
expect_status = 204
"#;

/// Record SCENARIO through a scripted network into `dir`
fn recorded_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let scenario_path = dir.join("scenario.toml");
    std::fs::write(&scenario_path, SCENARIO).unwrap();
    let trace_path = dir.join("trace.txt");

    let network = ScriptedTransport::new(vec![
        json_response(200, r#"{"login":"alice"}"#),
        json_response(200, r#"{"login":"me","bio":"Edited by wiretrace"}"#),
        json_response(204, ""),
    ]);
    let session = Session::record(&trace_path, Box::new(network)).unwrap();
    let credentials = Credentials::from_token("real-secret").unwrap();
    let mut client = ApiClient::new(session, credentials);

    let scenario = load_scenario(&scenario_path).unwrap();
    let outcomes = play_scenario(&mut client, &scenario).unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].label.as_deref(), Some("alice"));
    assert_eq!(outcomes[2].status, 204);

    client.into_transport().finish().unwrap();
    (scenario_path, trace_path)
}

#[test]
fn test_validate_run_args_valid() {
    assert!(validate_run_args(&RunArgs::default()).is_ok());
}

#[test]
fn test_validate_run_args_invalid_scheme() {
    let args = RunArgs {
        base_url: "ftp://api.github.com".to_string(),
        ..Default::default()
    };
    assert!(validate_run_args(&args).is_err());
}

#[test]
fn test_validate_run_args_empty_trace() {
    let args = RunArgs {
        trace_path: PathBuf::new(),
        ..Default::default()
    };
    assert!(validate_run_args(&args).is_err());
}

#[test]
fn test_validate_run_args_trace_is_directory() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        trace_path: dir.path().to_path_buf(),
        ..Default::default()
    };
    assert!(validate_run_args(&args).is_err());
}

#[test]
fn test_validate_run_args_zero_timeout() {
    let args = RunArgs {
        timeout_secs: 0,
        ..Default::default()
    };
    assert!(validate_run_args(&args).is_err());
}

#[test]
fn test_replay_run_succeeds_on_recorded_trace() {
    let dir = tempfile::tempdir().unwrap();
    let (scenario_path, trace_path) = recorded_fixture(dir.path());

    let text = std::fs::read_to_string(&trace_path).unwrap();
    assert!(!text.contains("real-secret"));

    let args = RunArgs {
        trace_path,
        scenario: Some(scenario_path),
        ..Default::default()
    };
    assert_eq!(execute_run(args).unwrap(), 3);
}

#[test]
fn test_replay_run_fails_on_changed_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let (scenario_path, trace_path) = recorded_fixture(dir.path());

    let changed = SCENARIO.replace("Edited by wiretrace", "Edited again");
    std::fs::write(&scenario_path, changed).unwrap();

    let args = RunArgs {
        trace_path,
        scenario: Some(scenario_path),
        ..Default::default()
    };
    let err = execute_run(args).unwrap_err();
    assert!(format!("{:#}", err).contains("Replay mismatch in exchange #2"));
}

#[test]
fn test_replay_run_without_trace() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        trace_path: dir.path().join("missing.txt"),
        ..Default::default()
    };

    let err = execute_run(args).unwrap_err();
    assert!(format!("{:#}", err).contains("Trace file not found"));
}

#[test]
fn test_record_run_without_token() {
    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        record: true,
        assume_yes: true,
        token: None,
        trace_path: dir.path().join("trace.txt"),
        ..Default::default()
    };

    let err = execute_run(args).unwrap_err();
    assert!(format!("{:#}", err).contains("Credentials missing"));
    assert!(!dir.path().join("trace.txt").exists());
}

#[test]
fn test_inspect_counts_exchanges() {
    let dir = tempfile::tempdir().unwrap();
    let (_, trace_path) = recorded_fixture(dir.path());

    let args = InspectArgs {
        trace_path,
        bodies: true,
    };
    assert_eq!(execute_inspect(args).unwrap(), 3);
}

#[test]
fn test_replay_builtin_scenario_with_writes() {
    let dir = tempfile::tempdir().unwrap();
    let trace_path = dir.path().join("trace.txt");

    let scenario = Scenario::builtin(true);
    let mut responses = vec![json_response(200, r#"{"login":"jacquev6"}"#); 5];
    responses.push(json_response(200, r#"{"bio":"Edited by wiretrace"}"#));
    responses.extend(vec![json_response(204, ""); 4]);
    assert_eq!(responses.len(), scenario.steps.len());

    let network = ScriptedTransport::new(responses);
    let session = Session::record(&trace_path, Box::new(network)).unwrap();
    let mut client = ApiClient::new(session, Credentials::from_token("real-secret").unwrap());
    play_scenario(&mut client, &scenario).unwrap();
    client.into_transport().finish().unwrap();

    let text = std::fs::read_to_string(&trace_path).unwrap();
    assert!(text.contains(r#"PATCH /user "#));
    assert!(text.contains(r#"{"bio":"Edited by wiretrace"}"#));

    let args = RunArgs {
        trace_path: trace_path.clone(),
        writes: true,
        ..Default::default()
    };
    assert_eq!(execute_run(args).unwrap(), 10);

    // Without the write steps the replay stops early; that only warns.
    let args = RunArgs {
        trace_path,
        ..Default::default()
    };
    assert_eq!(execute_run(args).unwrap(), 5);
}
