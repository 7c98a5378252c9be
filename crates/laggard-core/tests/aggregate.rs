//! Integration tests for the aggregator.
//!
//! Uses wiremock for HTTP mocking. Tests cover matrix extraction, the
//! incomplete-data retry loop, the build-report fallback, source builds,
//! and the all-or-nothing store contract.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use laggard_core::{AggregateError, Aggregator, AggregatorConfig, RetryPolicy, SlowestResults};

fn test_aggregator() -> Aggregator {
    let config = AggregatorConfig::default().with_timeout(5);
    Aggregator::new(&config)
        .expect("failed to create aggregator")
        .with_policy(RetryPolicy {
            max_retries: 2,
            delay: Duration::ZERO,
        })
}

fn case(class_name: &str, name: &str, duration: f64) -> serde_json::Value {
    json!({
        "className": class_name,
        "duration": duration,
        "name": name,
        "status": "PASSED",
    })
}

fn child(server_uri: &str, axis_value: u32, cases: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "child": {
            "url": format!("{server_uri}/job/portal/AXIS_VARIABLE%3D{axis_value}%2Clabel%3Dslave/17/"),
        },
        "result": { "suites": [{ "cases": cases }] },
    })
}

fn incomplete_child(server_uri: &str, axis_value: u32) -> serde_json::Value {
    json!({
        "child": {
            "url": format!("{server_uri}/job/portal/AXIS_VARIABLE%3D{axis_value}%2Clabel%3Dslave/17/"),
        },
        "result": null,
    })
}

#[tokio::test]
async fn matrix_report_yields_cases_from_every_child() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    let report = json!({
        "childReports": [
            child(&uri, 1, vec![case("com.example.ATest", "a1", 1.5), case("com.example.ATest", "a2", 3.0)]),
            child(&uri, 2, vec![case("com.example.BTest", "b1", 0.5)]),
        ],
    });

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(report))
        .mount(&mock_server)
        .await;

    let results = test_aggregator()
        .aggregate("portal", &format!("{uri}/job/portal/17"))
        .await
        .expect("aggregation failed");

    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a1", "a2", "b1"]);
    assert_eq!(results[0].axis, "AXIS_VARIABLE=1");
    assert_eq!(results[2].axis, "AXIS_VARIABLE=2");
    assert!(results[0]
        .url
        .ends_with("/17/testReport/com/example/ATest/a1"));
}

#[tokio::test]
async fn incomplete_child_is_retried_until_the_report_appears() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    let complete_children = vec![
        child(&uri, 1, vec![case("com.example.ATest", "a1", 1.5)]),
        child(&uri, 2, vec![case("com.example.BTest", "b1", 2.5)]),
        child(&uri, 3, vec![case("com.example.CTest", "c1", 3.5)]),
    ];
    let mut incomplete_children = complete_children.clone();
    incomplete_children[1] = incomplete_child(&uri, 2);

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "childReports": incomplete_children })),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "childReports": complete_children })),
        )
        .mount(&mock_server)
        .await;

    let results = test_aggregator()
        .aggregate("portal", &format!("{uri}/job/portal/17"))
        .await
        .expect("aggregation failed");

    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a1", "b1", "c1"]);
}

#[tokio::test]
async fn persistent_incomplete_data_exhausts_the_retry_budget() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    let child_url = format!("{uri}/job/portal/AXIS_VARIABLE%3D2%2Clabel%3Dslave/17/");

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "childReports": [incomplete_child(&uri, 2)],
        })))
        .expect(3)
        .mount(&mock_server)
        .await;

    let err = test_aggregator()
        .aggregate("portal", &format!("{uri}/job/portal/17"))
        .await
        .unwrap_err();

    match err {
        AggregateError::ReportNeverAvailable { url, attempts } => {
            assert_eq!(url, child_url);
            assert_eq!(attempts, 3);
        }
        other => panic!("expected ReportNeverAvailable, got {other}"),
    }
}

#[tokio::test]
async fn default_budget_is_five_retries_after_the_first_attempt() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "childReports": [incomplete_child(&uri, 1)],
        })))
        .expect(6)
        .mount(&mock_server)
        .await;

    let aggregator = Aggregator::new(&AggregatorConfig::default().with_timeout(5))
        .expect("failed to create aggregator")
        .with_policy(RetryPolicy {
            max_retries: RetryPolicy::default().max_retries,
            delay: Duration::ZERO,
        });

    let err = aggregator
        .aggregate("portal", &format!("{uri}/job/portal/17"))
        .await
        .unwrap_err();

    match err {
        AggregateError::ReportNeverAvailable { attempts, .. } => assert_eq!(attempts, 6),
        other => panic!("expected ReportNeverAvailable, got {other}"),
    }
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = test_aggregator()
        .aggregate("portal", &format!("{uri}/job/portal/17"))
        .await
        .unwrap_err();

    assert!(matches!(err, AggregateError::Http { status: 503, .. }));
}

#[tokio::test]
async fn source_builds_read_the_build_document() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/job/portal-source/17/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "duration": 45000,
            "fullDisplayName": "portal-source #17",
            "result": "SUCCESS",
            "url": format!("{uri}/job/portal-source/17/"),
        })))
        .mount(&mock_server)
        .await;

    let results = test_aggregator()
        .aggregate("portal-source", &format!("{uri}/job/portal-source/17"))
        .await
        .expect("aggregation failed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].duration_secs, 45.0);
    assert_eq!(results[0].axis, "");
    assert_eq!(results[0].class_name, "");
}

#[tokio::test]
async fn missing_test_report_falls_back_to_the_build_document() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/portal/17/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "duration": 600000,
            "fullDisplayName": "portal #17",
            "result": "UNSTABLE",
            "url": format!("{uri}/job/portal/17/"),
        })))
        .mount(&mock_server)
        .await;

    let results = test_aggregator()
        .aggregate("portal", &format!("{uri}/job/portal/17"))
        .await
        .expect("aggregation failed");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].duration_secs, 600.0);
    assert_eq!(results[0].status, "UNSTABLE");
}

#[tokio::test]
async fn failed_aggregation_never_mutates_the_store() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "childReports": [
                child(&uri, 1, vec![case("com.example.ATest", "a1", 1.5)]),
                incomplete_child(&uri, 2),
            ],
        })))
        .mount(&mock_server)
        .await;

    let store = SlowestResults::new(10);
    let err = test_aggregator()
        .aggregate_into(&store, "portal", &format!("{uri}/job/portal/17"))
        .await
        .unwrap_err();

    assert!(matches!(err, AggregateError::ReportNeverAvailable { .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn successful_batches_merge_into_a_bounded_ranking() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "childReports": [child(&uri, 1, vec![
                case("com.example.ATest", "a1", 1.5),
                case("com.example.ATest", "a2", 9.0),
            ])],
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/job/other/3/testReport/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "childReports": [child(&uri, 1, vec![
                case("com.example.BTest", "b1", 4.0),
            ])],
        })))
        .mount(&mock_server)
        .await;

    let aggregator = test_aggregator();
    let store = SlowestResults::new(2);
    aggregator
        .aggregate_into(&store, "portal", &format!("{uri}/job/portal/17"))
        .await
        .expect("first aggregation failed");
    aggregator
        .aggregate_into(&store, "other", &format!("{uri}/job/other/3"))
        .await
        .expect("second aggregation failed");

    let snapshot = store.snapshot();
    let names: Vec<_> = snapshot.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a2", "b1"]);
}

#[tokio::test]
async fn deadline_bounds_a_stuck_aggregation() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/job/portal/17/testReport/api/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "childReports": [incomplete_child(&uri, 1)],
        })))
        .mount(&mock_server)
        .await;

    let config = AggregatorConfig::default()
        .with_timeout(5)
        .with_retry_delay(30)
        .with_deadline(1);
    let aggregator = Aggregator::new(&config).expect("failed to create aggregator");

    let err = aggregator
        .aggregate("portal", &format!("{uri}/job/portal/17"))
        .await
        .unwrap_err();

    assert!(matches!(err, AggregateError::DeadlineExceeded { secs: 1 }));
}
