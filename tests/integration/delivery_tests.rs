//! Delivery failure tests: the handler's result survives every collector
//! failure.

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};
use zigmond::{ErrorKind, ReportOutcome, Tracer};

use crate::common::{TEST_APP_KEY, builder_for, init_logging, launch_event};

async fn speech(_event: Value, _ctx: ()) -> Result<Value, std::io::Error> {
    Ok(json!({"speech": "ok"}))
}

async fn collector_responding(template: ResponseTemplate) -> MockServer {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_slow_collector_is_dropped() {
    let server =
        collector_responding(ResponseTemplate::new(200).set_delay(Duration::from_secs(5))).await;
    let traced = builder_for(&server)
        .app_key(TEST_APP_KEY)
        .timeout(Duration::from_millis(200))
        .build()
        .expect("tracer builds")
        .wrap(speech);

    let invocation = traced.invoke(launch_event(), ()).await;

    assert_eq!(invocation.result.expect("handler succeeds"), json!({"speech": "ok"}));
    match invocation.report {
        ReportOutcome::Dropped(err) => assert_eq!(err.kind(), ErrorKind::Timeout),
        other => panic!("expected Dropped, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_collector_is_dropped() {
    init_logging();
    let traced = Tracer::builder()
        .app_key(TEST_APP_KEY)
        .endpoint("http://127.0.0.1:1/v1/trace")
        .timeout(Duration::from_secs(1))
        .build()
        .expect("tracer builds")
        .wrap(speech);

    let invocation = traced.invoke(launch_event(), ()).await;

    assert!(invocation.result.is_ok());
    let err = invocation.report.error().expect("delivery failed");
    assert!(err.is_transport_failure(), "unexpected error {}", err);
}

#[tokio::test]
async fn test_collector_hanging_up_is_dropped() {
    init_logging();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            drop(socket);
        }
    });

    let traced = Tracer::builder()
        .app_key(TEST_APP_KEY)
        .endpoint(format!("http://{}/v1/trace", addr))
        .env_lookup(|_| None)
        .build()
        .expect("tracer builds")
        .wrap(speech);

    let invocation = traced.invoke(launch_event(), ()).await;

    assert_eq!(invocation.result.expect("handler succeeds"), json!({"speech": "ok"}));
    match invocation.report {
        ReportOutcome::Dropped(err) => assert_eq!(err.kind(), ErrorKind::Connection),
        other => panic!("expected Dropped, got {:?}", other),
    }
}

#[tokio::test]
async fn test_collector_server_error_is_failed() {
    let server = collector_responding(ResponseTemplate::new(500)).await;
    let traced = builder_for(&server)
        .app_key(TEST_APP_KEY)
        .build()
        .expect("tracer builds")
        .wrap(speech);

    let invocation = traced.invoke(launch_event(), ()).await;

    assert!(invocation.result.is_ok());
    match invocation.report {
        ReportOutcome::Failed(err) => assert_eq!(err.kind(), ErrorKind::Unavailable),
        other => panic!("expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rejected_app_key_is_failed() {
    let server = collector_responding(ResponseTemplate::new(401)).await;
    let traced = builder_for(&server)
        .app_key("revoked")
        .build()
        .expect("tracer builds")
        .wrap(speech);

    let response = traced.call(launch_event(), ()).await;

    assert_eq!(response.expect("handler succeeds"), json!({"speech": "ok"}));
}

#[tokio::test]
async fn test_concurrent_invocations_each_report() {
    let server = collector_responding(ResponseTemplate::new(200)).await;
    let traced = builder_for(&server)
        .app_key(TEST_APP_KEY)
        .build()
        .expect("tracer builds")
        .wrap(speech);

    let outcomes =
        futures::future::join_all((0..10).map(|_| traced.invoke(launch_event(), ()))).await;

    assert!(outcomes.iter().all(|o| o.report.is_sent()));
    let received = server.received_requests().await.expect("recording enabled");
    assert_eq!(received.len(), 10);
}
