//! Integration tests for the port bus and configuration.

use core_runtime::config::EnvConfig;
use core_runtime::ports::{AuthCommand, AuthResult, ErrorInfo, LoginOptions, PortBus, UserSession};
use serde_json::json;

#[tokio::test]
async fn commands_and_results_flow_independently() {
    let ports = PortBus::new(8);
    let mut commands = ports.subscribe_commands();
    let mut results = ports.subscribe_results();

    ports
        .send_command(AuthCommand::StartLogin(LoginOptions {
            redirect_path: Some("/quiz".to_string()),
        }))
        .unwrap();

    ports
        .publish_result(AuthResult::ok(UserSession {
            profile: json!({"sub": "user-1"}),
            token: "tok".to_string(),
        }))
        .unwrap();

    // A command never appears on the result port and vice versa.
    match commands.recv().await.unwrap() {
        AuthCommand::StartLogin(options) => {
            assert_eq!(options.redirect_path.as_deref(), Some("/quiz"))
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert!(commands.try_recv().is_err());

    let result = results.recv().await.unwrap();
    assert!(result.is_ok());
    assert!(results.try_recv().is_err());
}

#[tokio::test]
async fn late_subscriber_misses_earlier_results() {
    let ports = PortBus::new(8);
    // Keep one subscriber alive so publishing succeeds.
    let _early = ports.subscribe_results();

    ports
        .publish_result(AuthResult::err(ErrorInfo::default()))
        .unwrap();

    let mut late = ports.subscribe_results();
    assert!(late.try_recv().is_err());
}

#[test]
fn auth_result_wire_format_matches_application_expectations() {
    let result = AuthResult::err(ErrorInfo {
        name: Some("APIError".to_string()),
        code: None,
        status_code: Some(500),
        extra: serde_json::Map::new(),
    });

    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(
        wire,
        json!({
            "err": {"name": "APIError", "code": null, "statusCode": 500},
            "ok": null
        })
    );
}

#[test]
fn config_builder_and_env_names_agree() {
    let config = EnvConfig::builder()
        .backend_uri("https://api.example.com")
        .auth_tenant("example.auth0.com")
        .auth_client_id("client-123")
        .app_url("https://app.example.com")
        .build()
        .unwrap();

    assert_eq!(config.backend_uri, "https://api.example.com");

    let missing = EnvConfig::builder().build().unwrap_err();
    assert!(missing.to_string().contains("QUIZ_API_URI"));
}
