//! End-to-end decorator tests: handler in, HTTP report out.

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zigmond::{AppKey, TraceArg, Tracer};

use crate::common::{
    TEST_APP_KEY, TRACE_PATH, accepting_collector, builder_for, is_response_ts, launch_event,
    received_reports, tracer_for,
};

#[derive(Debug, PartialEq)]
struct SkillError(String);

async fn welcome(event: Value, _ctx: ()) -> Result<Value, SkillError> {
    match event["request"]["type"].as_str() {
        Some("LaunchRequest") => Ok(json!({
            "version": "1.0",
            "response": {"outputSpeech": {"type": "PlainText", "text": "Welcome"}}
        })),
        other => Err(SkillError(format!("unhandled {:?}", other))),
    }
}

#[tokio::test]
async fn test_report_carries_event_response_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRACE_PATH))
        .and(header("X-Zigmond-App-Key", TEST_APP_KEY))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let traced = tracer_for(&server).wrap(welcome);
    let response = traced.call(launch_event(), ()).await.expect("handler succeeds");

    assert_eq!(response["response"]["outputSpeech"]["text"], "Welcome");

    let reports = received_reports(&server).await.expect("reports readable");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["request"], launch_event());
    assert_eq!(reports[0]["response"], response);
    let ts = reports[0]["response_ts"].as_str().expect("response_ts present");
    assert!(is_response_ts(ts), "unexpected timestamp {}", ts);
}

#[tokio::test]
async fn test_event_without_request_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let traced = tracer_for(&server)
        .wrap(|_event: Value, _ctx: ()| async { Ok::<_, SkillError>(json!({"ok": true})) });

    for event in [json!({"session": {"new": true}}), json!({"request": {}})] {
        let invocation = traced.invoke(event, ()).await;
        assert_eq!(invocation.result, Ok(json!({"ok": true})));
        assert!(invocation.report.is_skipped());
    }
}

#[tokio::test]
async fn test_handler_error_sends_request_only() {
    let server = accepting_collector().await;
    let traced = tracer_for(&server).wrap(welcome);

    let event = json!({"request": {"type": "SessionEndedRequest"}});
    let result = traced.call(event.clone(), ()).await;

    assert_eq!(
        result,
        Err(SkillError("unhandled Some(\"SessionEndedRequest\")".to_string()))
    );

    let reports = received_reports(&server).await.expect("reports readable");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0], json!({"request": event}));
}

#[tokio::test]
async fn test_empty_response_omits_response_fields() {
    let server = accepting_collector().await;
    let traced = tracer_for(&server)
        .wrap(|_event: Value, _ctx: ()| async { Ok::<_, SkillError>(json!({})) });

    traced.call(launch_event(), ()).await.expect("handler succeeds");

    let reports = received_reports(&server).await.expect("reports readable");
    assert_eq!(reports, vec![json!({"request": launch_event()})]);
}

#[tokio::test]
async fn test_handler_mutation_does_not_leak_into_report() {
    let server = accepting_collector().await;
    let traced = tracer_for(&server).wrap(|mut event: Value, _ctx: ()| async move {
        event["request"]["locale"] = json!("de-DE");
        event["injected"] = json!(true);
        Ok::<_, SkillError>(json!({"seen": event["request"]["locale"]}))
    });

    traced.call(launch_event(), ()).await.expect("handler succeeds");

    let reports = received_reports(&server).await.expect("reports readable");
    assert_eq!(reports[0]["request"], launch_event());
    assert_eq!(reports[0]["response"], json!({"seen": "de-DE"}));
}

#[tokio::test]
async fn test_decorator_usages_send_identical_reports() {
    let explicit_server = accepting_collector().await;
    let bare_server = accepting_collector().await;

    let explicit = builder_for(&explicit_server)
        .decorate(TraceArg::<fn(Value, ())>::AppKey(AppKey::new(TEST_APP_KEY)))
        .expect("explicit key decorates")
        .into_tracer()
        .expect("explicit key yields a tracer")
        .wrap(welcome);
    let bare = builder_for(&bare_server)
        .env_lookup(|_| Some(TEST_APP_KEY.to_string()))
        .decorate(TraceArg::Handler(welcome))
        .expect("bare handler decorates")
        .into_traced()
        .expect("bare handler yields a traced handler");

    let a = explicit.call(launch_event(), ()).await;
    let b = bare.call(launch_event(), ()).await;
    assert_eq!(a, b);

    let explicit_reports = received_reports(&explicit_server).await.expect("reports readable");
    let bare_reports = received_reports(&bare_server).await.expect("reports readable");
    assert_eq!(explicit_reports.len(), 1);
    assert_eq!(bare_reports.len(), 1);
    assert_eq!(explicit_reports[0]["request"], bare_reports[0]["request"]);
    assert_eq!(explicit_reports[0]["response"], bare_reports[0]["response"]);
}

#[tokio::test]
async fn test_missing_app_key_fails_before_any_invocation() {
    let server = MockServer::start().await;

    let err = builder_for(&server)
        .decorate(TraceArg::Handler(welcome))
        .expect_err("no key anywhere");

    assert_eq!(err.kind(), zigmond::ErrorKind::Configuration);
    assert!(err.to_string().contains("ZIGMOND_APP_KEY"));
}

#[tokio::test]
async fn test_one_tracer_wraps_many_handlers() {
    let server = accepting_collector().await;
    let tracer: Tracer = tracer_for(&server);

    let launch = tracer.wrap(welcome);
    let help = tracer.wrap(|_event: Value, _ctx: ()| async {
        Ok::<_, SkillError>(json!({"speech": "help"}))
    });

    launch.call(launch_event(), ()).await.expect("launch succeeds");
    help.call(json!({"request": {"type": "IntentRequest"}}), ())
        .await
        .expect("help succeeds");

    let reports = received_reports(&server).await.expect("reports readable");
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[1]["response"], json!({"speech": "help"}));
}

#[tokio::test]
async fn test_exact_body_for_launch_event() {
    let server = MockServer::start().await;
    let traced = tracer_for(&server)
        .wrap(|_event: Value, _ctx: ()| async { Ok::<Value, SkillError>(Value::Null) });

    Mock::given(method("POST"))
        .and(path(TRACE_PATH))
        .and(body_json(json!({"request": launch_event()})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let invocation = traced.invoke(launch_event(), ()).await;
    assert!(invocation.report.is_sent());
}
