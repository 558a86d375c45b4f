use serde_json::json;
use serde_json::Value;

use super::*;
use crate::AwaitError;
use crate::DecodeError;
use crate::TransportError;

/// An emitter whose connection is already up and whose store is `state`.
/// Tests add their own `emit` expectations.
pub(crate) fn connected_emitter(state: &State) -> MockStatefulEmitter {
    let mut emitter = MockStatefulEmitter::new();
    let state = state.clone();
    emitter.expect_state().returning(move || state.clone());
    emitter.expect_timeouts().returning(TimeoutConfig::default);
    emitter.expect_await_event().returning(|_, _| Ok(()));
    emitter
}

/// Makes the next `event` emission acknowledge with `ack`.
pub(crate) fn acks(
    emitter: &mut MockStatefulEmitter,
    event: &'static str,
    ack: Value,
) {
    emitter
        .expect_emit()
        .withf(move |name, _, _| name == event)
        .times(1)
        .returning(move |_, _, _| Ok(ack.clone()));
}

#[test]
fn decode_ack_accepts_object_payload() {
    let body: Envelope<Empty> = decode_ack("x", json!([{"ok": true, "msg": "fine"}])).unwrap();
    assert!(body.ok);
    assert_eq!(body.msg.as_deref(), Some("fine"));
}

#[test]
fn decode_ack_accepts_json_encoded_payload() {
    let body: Envelope<Empty> = decode_ack("x", json!([r#"{"ok":true}"#])).unwrap();
    assert!(body.ok);

    let need: bool = decode_ack("needSetup", json!([true])).unwrap();
    assert!(need);
}

#[test]
fn decode_ack_rejects_anything_but_one_element() {
    for raw in [json!([]), json!([1, 2]), json!({"ok": true}), Value::Null] {
        match decode_ack::<Envelope<Empty>>("x", raw) {
            Err(Error::Action(ActionError::InvalidResponse { action })) => assert_eq!(action, "x"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

#[test]
fn decode_ack_reports_undecodable_payload() {
    match decode_ack::<Envelope<Empty>>("x", json!(["{not json"])) {
        Err(Error::Action(ActionError::Decode {
            action,
            source: DecodeError::Json(_),
        })) => assert_eq!(action, "x"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn envelope_not_ok_becomes_failed_with_message() {
    let envelope: Envelope<Empty> = decode_ack("deleteTag", json!([{"ok": false, "msg": "nope"}])).unwrap();
    match envelope.into_result("deleteTag") {
        Err(Error::Action(ActionError::Failed { action, msg })) => {
            assert_eq!(action, "deleteTag");
            assert_eq!(msg, "nope");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn request_fails_without_emitting_when_connect_never_arrives() {
    let state = State::new();
    let mut emitter = MockStatefulEmitter::new();
    let store = state.clone();
    emitter.expect_state().returning(move || store.clone());
    emitter.expect_timeouts().returning(TimeoutConfig::default);
    emitter
        .expect_await_event()
        .returning(|kind, timeout| Err(AwaitError::Timeout { event: kind, timeout }.into()));
    emitter.expect_emit().never();

    let err = request::<_, Empty>(&emitter, "clearStatistics", Vec::new()).await.unwrap_err();

    assert!(err.is_timeout());
    match err {
        Error::Action(ActionError::AwaitFailed { event, .. }) => assert_eq!(event, EventKind::Connect),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn request_wraps_transport_failure() {
    let state = State::new();
    let mut emitter = connected_emitter(&state);
    emitter.expect_emit().returning(|event, timeout, _| {
        Err(TransportError::AckTimeout {
            event: event.to_string(),
            timeout,
        }
        .into())
    });

    let err = request::<_, Empty>(&emitter, "clearStatistics", Vec::new()).await.unwrap_err();

    assert!(err.is_timeout());
    assert!(matches!(
        err,
        Error::Action(ActionError::Emit {
            action: "clearStatistics",
            ..
        })
    ));
}

#[tokio::test]
async fn request_uses_configured_emit_timeout() {
    let state = State::new();
    let mut emitter = connected_emitter(&state);
    let expected = TimeoutConfig::default().emit_timeout();
    emitter
        .expect_emit()
        .withf(move |_, timeout, _| *timeout == expected)
        .returning(|_, _, _| Ok(json!([{"ok": true}])));

    request::<_, Empty>(&emitter, "clearStatistics", Vec::new()).await.unwrap();
}

#[test]
fn ignore_uncached_only_swallows_missing_entries() {
    assert!(ignore_uncached(Err(StateError::NotSetYet.into())).is_ok());
    assert!(ignore_uncached(Err(StateError::NotFound { kind: "monitor", id: 1 }.into())).is_ok());
    assert!(matches!(
        ignore_uncached(Err(StateError::StateIsNil.into())),
        Err(Error::State(StateError::StateIsNil))
    ));
}
