use serde_json::{json, Value};
use stream_pipeline::lifecycle::{Config, PipelineSystem};
use stream_pipeline::pipeline::Pipeline;

async fn send(pipeline: &Pipeline, request: Value) -> Value {
    let output = pipeline.process_json(&request.to_string()).await;
    serde_json::from_str(&output).expect("pipeline always answers with JSON")
}

fn test_mode(mut request: Value) -> Value {
    request["debug"] = json!({"mode": "test"});
    request
}

fn error_codes(response: &Value) -> Vec<String> {
    response["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["code"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Full stream lifecycle in test mode against the seeded fixture store.
#[tokio::test]
async fn test_stream_lifecycle_in_test_mode() {
    let system = PipelineSystem::start(&Config::default())
        .await
        .expect("Failed to start pipeline");
    let pipeline = &system.pipeline;

    // 1. Create: the fixture already holds four streams
    let created = send(
        pipeline,
        test_mode(json!({
            "requestType": "create",
            "stream": {
                "classShortName": "DEPOSIT",
                "methodShortName": "CLOSE",
                "transportParams": "queue=deposit.close",
                "description": "Deposit closing"
            }
        })),
    )
    .await;
    assert_eq!(created["responseType"], "create");
    assert_eq!(created["result"], "success");
    assert_eq!(created["stream"]["id"], "5");
    assert_eq!(created["stream"]["active"], false);

    // 2. Read it back
    let read = send(pipeline, test_mode(json!({"requestType": "read", "streamId": "5"}))).await;
    assert_eq!(read["stream"]["methodShortName"], "CLOSE");

    // 3. Update
    let updated = send(
        pipeline,
        test_mode(json!({
            "requestType": "update",
            "stream": {
                "id": "5",
                "classShortName": "DEPOSIT",
                "methodShortName": "CLOSE",
                "transportParams": "queue=deposit.close.v2",
                "description": "Deposit closing v2"
            }
        })),
    )
    .await;
    assert_eq!(updated["result"], "success");
    assert_eq!(updated["stream"]["transportParams"], "queue=deposit.close.v2");

    // 4. Enable, then deleting is refused
    let enabled = send(pipeline, test_mode(json!({"requestType": "enable", "streamId": "5"}))).await;
    assert_eq!(enabled["stream"]["active"], true);

    let refused = send(pipeline, test_mode(json!({"requestType": "delete", "streamId": "5"}))).await;
    assert_eq!(refused["result"], "error");
    assert_eq!(error_codes(&refused), vec!["cannot-delete"]);
    assert_eq!(refused["errors"][0]["group"], "business");

    // 5. Accessible now includes it alongside the two active fixtures
    let accessible = send(
        pipeline,
        test_mode(json!({"requestType": "accessible", "externalSystemId": "333"})),
    )
    .await;
    let ids: Vec<_> = accessible["streams"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["1", "2", "5"]);

    // 6. Disable and delete
    send(pipeline, test_mode(json!({"requestType": "disable", "streamId": "5"}))).await;
    let deleted = send(pipeline, test_mode(json!({"requestType": "delete", "streamId": "5"}))).await;
    assert_eq!(deleted["result"], "success");
    assert_eq!(deleted["stream"]["id"], "5");

    // 7. Gone
    let missing = send(pipeline, test_mode(json!({"requestType": "read", "streamId": "5"}))).await;
    assert_eq!(missing["result"], "error");
    assert_eq!(error_codes(&missing), vec!["not-found"]);
    assert!(missing["stream"].get("id").is_none());

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_search_filters_fixture() {
    let system = PipelineSystem::start(&Config::default()).await.unwrap();

    let by_class = send(
        &system.pipeline,
        test_mode(json!({
            "requestType": "search",
            "streamFilter": {"classShortName": "KRED_CORP"}
        })),
    )
    .await;
    assert_eq!(by_class["streams"].as_array().unwrap().len(), 2);

    let by_text = send(
        &system.pipeline,
        test_mode(json!({
            "requestType": "search",
            "streamFilter": {"searchString": "deposit", "active": false}
        })),
    )
    .await;
    let streams = by_text["streams"].as_array().unwrap();
    assert_eq!(streams.len(), 1);
    assert_eq!(streams[0]["classShortName"], "DEPOSIT");

    system.shutdown().await.unwrap();
}

/// Prod mode starts empty and reports every invalid field at once.
#[tokio::test]
async fn test_validation_errors_accumulate() {
    let system = PipelineSystem::start(&Config::default()).await.unwrap();

    let response = send(
        &system.pipeline,
        json!({"requestType": "create", "stream": {"transportParams": "queue=x"}}),
    )
    .await;
    assert_eq!(response["result"], "error");
    assert_eq!(
        error_codes(&response),
        vec![
            "validation-class-short-name",
            "validation-method-short-name",
            "validation-description"
        ]
    );

    let search = send(&system.pipeline, json!({"requestType": "search"})).await;
    assert_eq!(search["result"], "success");
    assert_eq!(search["streams"], json!([]));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_stub_cases_over_the_wire() {
    let system = PipelineSystem::start(&Config::default()).await.unwrap();
    let cases = [
        ("read", "not_found", "not-found"),
        ("update", "bad_id", "validation-id"),
        ("create", "bad_class", "validation-class-short-name"),
        ("search", "bad_method", "validation-method-short-name"),
        ("create", "bad_description", "validation-description"),
        ("delete", "cannot_delete", "cannot-delete"),
        ("search", "bad_search_string", "validation-search-string"),
        ("accessible", "db_error", "db-error"),
        ("enable", "bad_search_string", "stub-unsupported"),
    ];

    for (kind, stub, code) in cases {
        let response = send(
            &system.pipeline,
            json!({"requestType": kind, "debug": {"mode": "stub", "stub": stub}}),
        )
        .await;
        assert_eq!(response["responseType"], kind, "{kind}/{stub}");
        assert_eq!(response["result"], "error", "{kind}/{stub}");
        assert_eq!(error_codes(&response), vec![code], "{kind}/{stub}");
    }

    let created = send(
        &system.pipeline,
        json!({
            "requestType": "create",
            "debug": {"mode": "stub", "stub": "success"},
            "stream": {"classShortName": "CLIENT", "methodShortName": "EXPORT2FNS"}
        }),
    )
    .await;
    assert_eq!(created["result"], "success");
    assert_eq!(created["stream"]["id"], "stub-0001");
    assert!(created.get("errors").is_none());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_fatal_errors_become_failure_documents() {
    let system = PipelineSystem::start(&Config::default()).await.unwrap();
    let cases = [
        (r#"{"requestType":"archive"}"#, "unknown-request-kind", "request"),
        (r#"{"streamId":"1"}"#, "unknown-request-kind", "request"),
        ("not json", "malformed-request", "request"),
        (r#"{"requestType":"read","streamId":7}"#, "malformed-request", "request"),
        (
            r#"{"requestType":"read","debug":{"mode":"stub"}}"#,
            "missing-stub-case",
            "stub",
        ),
    ];

    for (input, code, group) in cases {
        let output = system.pipeline.process_json(input).await;
        let response: Value = serde_json::from_str(&output).unwrap();
        assert!(response.get("responseType").is_none(), "{input}");
        assert_eq!(response["result"], "error", "{input}");
        assert_eq!(response["errors"][0]["code"], code, "{input}");
        assert_eq!(response["errors"][0]["group"], group, "{input}");
    }

    system.shutdown().await.unwrap();
}

/// Requests run concurrently on cloned pipelines without interfering.
#[tokio::test]
async fn test_concurrent_requests() {
    let system = PipelineSystem::start(&Config::default()).await.unwrap();

    let mut tasks = Vec::new();
    for n in 0..16 {
        let pipeline = system.pipeline.clone();
        tasks.push(tokio::spawn(async move {
            let request = json!({
                "requestType": "create",
                "stream": {
                    "classShortName": "CLIENT",
                    "methodShortName": format!("EXPORT{n}"),
                    "transportParams": "queue=fns.export",
                    "description": "Export"
                }
            });
            send(&pipeline, request).await
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        let response = task.await.unwrap();
        assert_eq!(response["result"], "success");
        ids.push(response["stream"]["id"].as_str().unwrap().to_string());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);

    system.shutdown().await.unwrap();
}
