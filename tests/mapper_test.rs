use serde_json::{json, Value};
use stream_pipeline::context::{RequestContext, StreamRequest, StreamResponse};
use stream_pipeline::error::PipelineError;
use stream_pipeline::mapper::{from_transport, to_transport};
use stream_pipeline::model::{
    Command, ExternalSystemId, State, Stream, StreamFilter, StreamId, StructuredError, StubCase,
    WorkMode,
};
use stream_pipeline::transport::{decode_json, known_request_kinds};

fn decode(value: Value) -> RequestContext {
    from_transport(decode_json(&value.to_string()).expect("decodable request"))
}

fn encode(ctx: &RequestContext) -> Value {
    serde_json::to_value(to_transport(ctx).expect("encodable context")).unwrap()
}

fn request_for(command: Command) -> StreamRequest {
    let id = || Stream::with_id(StreamId::from("12345"));
    match command {
        Command::None => StreamRequest::None,
        Command::Create => StreamRequest::Create(Stream::none()),
        Command::Read => StreamRequest::Read(id()),
        Command::Update => StreamRequest::Update(id()),
        Command::Delete => StreamRequest::Delete(id()),
        Command::Search => StreamRequest::Search(StreamFilter::default()),
        Command::Enable => StreamRequest::Enable(id()),
        Command::Disable => StreamRequest::Disable(id()),
        Command::Accessible => StreamRequest::Accessible(ExternalSystemId::from("333")),
    }
}

fn kred_corp(id: StreamId) -> Stream {
    Stream {
        id,
        description: "Corporate loan payment calendar".into(),
        class_short_name: "KRED_CORP".into(),
        method_short_name: "PAYMENT_CALENDAR".into(),
        transport_params: "queue=kred.calendar".into(),
        active: true,
    }
}

/// Scenario A: create with stub success.
#[test]
fn test_create_with_stub_debug() {
    let ctx = decode(json!({
        "requestType": "create",
        "debug": {"mode": "stub", "stub": "success"},
        "stream": {
            "classShortName": "CLIENT",
            "methodShortName": "EXPORT2FNS",
            "transportParams": "some transport",
            "description": "Client export to the tax service"
        }
    }));

    assert_eq!(ctx.command(), Command::Create);
    assert_eq!(ctx.work_mode, WorkMode::Stub);
    assert_eq!(ctx.stub_case, StubCase::Success);
    assert_eq!(
        ctx.request(),
        &StreamRequest::Create(Stream {
            class_short_name: "CLIENT".into(),
            method_short_name: "EXPORT2FNS".into(),
            transport_params: "some transport".into(),
            description: "Client export to the tax service".into(),
            ..Stream::none()
        })
    );
}

/// Scenario B: update carries its id inside the stream object.
#[test]
fn test_update_by_id() {
    let ctx = decode(json!({
        "requestType": "update",
        "stream": {
            "id": "12345",
            "classShortName": "KRED_CORP",
            "methodShortName": "PAYMENT_CALENDAR",
            "transportParams": "queue=kred.calendar",
            "description": "Calendar"
        }
    }));

    assert_eq!(ctx.command(), Command::Update);
    let stream = ctx.request().stream().expect("update carries a stream");
    assert_eq!(stream.id, StreamId::from("12345"));
    assert_eq!(stream.class_short_name, "KRED_CORP");
}

/// Scenario C: bare-id commands decode to an id-only stream.
#[test]
fn test_bare_id_commands() {
    for kind in ["read", "delete", "enable", "disable"] {
        let ctx = decode(json!({"requestType": kind, "streamId": "12345"}));
        assert_eq!(ctx.command().as_str(), kind);
        assert_eq!(
            ctx.request().stream(),
            Some(&Stream::with_id(StreamId::from("12345")))
        );
        assert_eq!(ctx.work_mode, WorkMode::Prod);
        assert_eq!(ctx.stub_case, StubCase::None);
    }
}

/// Scenario D: errors and stream are encoded, result stays absent.
#[test]
fn test_encode_read_with_errors() {
    let mut ctx = RequestContext::new();
    ctx.set_request(request_for(Command::Read));
    ctx.add_error(StructuredError::new("A1", "G1", "Some message..."));
    ctx.set_stream_response(kred_corp(StreamId::from("12345")));

    let encoded = encode(&ctx);
    assert_eq!(encoded["responseType"], "read");
    assert!(encoded.get("result").is_none());
    assert_eq!(
        encoded["errors"],
        json!([{"code": "A1", "group": "G1", "message": "Some message..."}])
    );
    assert_eq!(
        encoded["stream"],
        json!({
            "id": "12345",
            "classShortName": "KRED_CORP",
            "methodShortName": "PAYMENT_CALENDAR",
            "transportParams": "queue=kred.calendar",
            "description": "Corporate loan payment calendar",
            "active": true
        })
    );
}

/// Scenario E: search results keep their order and the per-item id rule.
#[test]
fn test_encode_search_results() {
    let mut ctx = RequestContext::new();
    ctx.set_request(request_for(Command::Search));
    ctx.state = State::Finishing;
    ctx.set_streams_response(vec![kred_corp(StreamId::NONE), kred_corp(StreamId::from("7"))]);

    let encoded = encode(&ctx);
    let streams = encoded["streams"].as_array().expect("streams array");
    assert_eq!(streams.len(), 2);
    assert!(streams[0].get("id").is_none());
    assert_eq!(streams[1]["id"], "7");
    assert_eq!(encoded["result"], "success");
    assert!(encoded.get("errors").is_none());
}

#[test]
fn test_search_filter_decodes_every_field() {
    let ctx = decode(json!({
        "requestType": "search",
        "streamFilter": {
            "searchString": "calendar",
            "classShortName": "KRED_CORP",
            "methodShortName": "PAYMENT_CALENDAR",
            "active": true
        }
    }));
    assert_eq!(
        ctx.request(),
        &StreamRequest::Search(StreamFilter {
            search_string: "calendar".into(),
            class_short_name: "KRED_CORP".into(),
            method_short_name: "PAYMENT_CALENDAR".into(),
            active: true,
        })
    );

    // Absent fields fall back to an unrestricted filter
    let partial = decode(json!({
        "requestType": "search",
        "streamFilter": {"methodShortName": "SIGN"}
    }));
    assert_eq!(
        partial.request(),
        &StreamRequest::Search(StreamFilter {
            method_short_name: "SIGN".into(),
            ..StreamFilter::default()
        })
    );
    for document in [
        json!({"requestType": "search", "streamFilter": {}}),
        json!({"requestType": "search"}),
    ] {
        assert_eq!(
            decode(document).request(),
            &StreamRequest::Search(StreamFilter::default())
        );
    }
}

#[test]
fn test_accessible_decodes_external_system_id() {
    let ctx = decode(json!({"requestType": "accessible", "externalSystemId": "333"}));
    assert_eq!(ctx.command(), Command::Accessible);
    assert_eq!(
        ctx.request(),
        &StreamRequest::Accessible(ExternalSystemId::from("333"))
    );

    let anonymous = decode(json!({"requestType": "accessible"}));
    assert_eq!(
        anonymous.request(),
        &StreamRequest::Accessible(ExternalSystemId::NONE)
    );
}

#[test]
fn test_every_known_kind_decodes() {
    let kinds: Vec<_> = known_request_kinds().collect();
    assert_eq!(kinds.len(), 8);
    for kind in kinds {
        let ctx = decode(json!({"requestType": kind}));
        assert_eq!(ctx.command().as_str(), kind);
    }

    let err = decode_json(r#"{"requestType":"archive"}"#).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownRequestKind(kind) if kind == "archive"));
}

#[test]
fn test_state_to_result_for_every_command() {
    let expected = [
        (State::Running, Some("success")),
        (State::Finishing, Some("success")),
        (State::Failing, Some("error")),
        (State::None, None),
    ];
    for command in Command::ALL {
        for (state, result) in expected {
            let mut ctx = RequestContext::new();
            ctx.set_request(request_for(command));
            ctx.state = state;

            let encoded = encode(&ctx);
            assert_eq!(encoded["responseType"], command.as_str());
            assert_eq!(
                encoded.get("result").and_then(Value::as_str),
                result,
                "{command} in {state:?}"
            );
        }
    }
}

#[test]
fn test_none_command_cannot_be_encoded() {
    let ctx = RequestContext::new();
    assert!(matches!(
        to_transport(&ctx),
        Err(PipelineError::UnknownCommand(Command::None))
    ));
}

/// Decode, echo the request stream as the answer, encode: the command and the
/// stream fields survive.
#[test]
fn test_round_trip_through_pass_through_executor() {
    let documents = [
        json!({"requestType": "create", "stream": {
            "classShortName": "CLIENT", "methodShortName": "EXPORT2FNS",
            "transportParams": "queue=fns.export", "description": "Export"}}),
        json!({"requestType": "update", "stream": {
            "id": "3", "classShortName": "KRED_CORP", "methodShortName": "SIGN",
            "transportParams": "queue=kred.sign", "description": "Signing"}}),
        json!({"requestType": "read", "streamId": "1"}),
        json!({"requestType": "delete", "streamId": "2"}),
        json!({"requestType": "enable", "streamId": "3"}),
        json!({"requestType": "disable", "streamId": "4"}),
        json!({"requestType": "search", "streamFilter": {"searchString": "loan"}}),
        json!({"requestType": "accessible", "externalSystemId": "333"}),
    ];

    for document in documents {
        let mut ctx = decode(document.clone());
        if let Some(stream) = ctx.request().stream().cloned() {
            ctx.set_response(StreamResponse::Single(stream));
        }
        let encoded = encode(&ctx);
        assert_eq!(encoded["responseType"], document["requestType"]);

        if let Some(sent) = document.get("stream") {
            for (field, value) in sent.as_object().unwrap() {
                assert_eq!(&encoded["stream"][field], value, "{field}");
            }
        }
        if let Some(id) = document.get("streamId") {
            assert_eq!(&encoded["stream"]["id"], id);
        }
    }
}
