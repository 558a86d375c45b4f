use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde_json::json;
use tokio::time::sleep;
use tracing_test::traced_test;

use super::*;
use crate::action;
use crate::test_utils::LoopbackConnection;
use crate::ActionError;
use crate::Error;
use crate::RetentionConfig;
use crate::StateError;
use crate::TransportError;

fn client_over(connection: &Arc<LoopbackConnection>) -> Client {
    Client::builder(connection.clone()).build().unwrap()
}

#[test]
fn build_registers_every_event() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);

    for kind in EventKind::ALL {
        assert!(connection.is_registered(kind.name()), "{kind} not registered");
        assert!(!client.occurred(kind));
    }
}

#[test]
fn build_rejects_invalid_config() {
    let connection = LoopbackConnection::new();
    let result = Client::builder(connection.clone())
        .poll_interval(Duration::from_secs(10))
        .await_timeout(Duration::from_secs(1))
        .build();

    assert!(matches!(result, Err(Error::InvalidConfig(_))));
    assert!(!connection.is_registered("connect"));
}

#[test]
fn oversized_emit_timeout_saturates() {
    let connection = LoopbackConnection::new();
    let client = Client::builder(connection.clone())
        .emit_timeout(Duration::MAX)
        .build()
        .unwrap();

    assert_eq!(client.config().timeouts.emit_timeout_ms, u64::MAX);
    assert_eq!(super::builder::saturating_millis(Duration::from_millis(1500)), 1500);
}

#[test]
fn builder_retention_reaches_the_store() {
    let connection = LoopbackConnection::new();
    let client = Client::builder(connection.clone())
        .retention(RetentionConfig {
            heartbeat_capacity: 2,
            important_heartbeat_capacity: 1,
        })
        .build()
        .unwrap();

    for id in 0..5 {
        connection
            .push("heartbeat", vec![json!({"id": id, "monitorId": 1, "status": 1})])
            .unwrap();
    }

    assert_eq!(client.state().heartbeats(1).unwrap().len(), 2);
}

#[tokio::test]
#[traced_test]
async fn await_returns_once_event_has_occurred() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);

    connection.push("connect", Vec::new()).unwrap();

    client
        .await_event(EventKind::Connect, Duration::from_millis(50))
        .await
        .unwrap();
    assert!(client.state().connected().unwrap());
}

#[tokio::test(start_paused = true)]
async fn await_times_out_when_event_never_arrives() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);

    let err = client
        .await_event(EventKind::Info, Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    match err {
        Error::Await(AwaitError::Timeout { event, timeout }) => {
            assert_eq!(event, EventKind::Info);
            assert_eq!(timeout, Duration::from_secs(5));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_awaits_all_observe_late_event() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);

    let waiters = (0..8).map(|_| {
        let client = client.clone();
        async move { client.await_event(EventKind::Info, Duration::from_secs(5)).await }
    });
    let pusher = {
        let connection = connection.clone();
        async move {
            sleep(Duration::from_millis(750)).await;
            connection
                .push("info", vec![json!({"version": "1.23.0"})])
                .unwrap();
        }
    };

    let (results, ()) = tokio::join!(join_all(waiters), pusher);

    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(client.state().info().unwrap().version.as_deref(), Some("1.23.0"));
}

#[tokio::test]
async fn disconnect_is_awaitable() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);

    connection.push("connect", Vec::new()).unwrap();
    connection.push("disconnect", vec![json!("transport close")]).unwrap();

    client
        .await_event(EventKind::Disconnect, Duration::from_millis(50))
        .await
        .unwrap();
    assert!(!client.state().connected().unwrap());
}

#[tokio::test]
async fn extra_callbacks_run_alongside_handlers() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);
    let calls = Arc::new(parking_lot::Mutex::new(0));

    {
        let calls = calls.clone();
        client
            .on(
                "connect",
                Arc::new(move |_: &[Value]| -> Result<()> {
                    *calls.lock() += 1;
                    Ok(())
                }),
            )
            .unwrap();
    }
    connection.push("connect", Vec::new()).unwrap();

    assert_eq!(*calls.lock(), 1);
    assert!(client.occurred(EventKind::Connect));
}

#[tokio::test]
async fn actions_run_through_the_client() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);
    connection.respond("getTags", |_| {
        Ok(json!([{"ok": true, "tags": [{"id": 1, "name": "prod", "color": "#ff0000"}]}]))
    });
    connection.push("connect", Vec::new()).unwrap();

    let tags = action::get_tags(&client).await.unwrap();

    assert_eq!(tags.len(), 1);
    assert_eq!(client.state().tag(1).unwrap().name, "prod");
    assert_eq!(connection.emitted(), vec![("getTags".to_string(), Vec::new())]);
}

#[tokio::test(start_paused = true)]
async fn action_before_connect_fails_without_emitting() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);

    let err = action::clear_statistics(&client).await.unwrap_err();

    assert!(err.is_timeout());
    assert!(matches!(err, Error::Action(ActionError::AwaitFailed { .. })));
    assert!(connection.emitted().is_empty());
}

#[tokio::test]
#[traced_test]
async fn close_tears_down_every_clone() {
    let connection = LoopbackConnection::new();
    let client = client_over(&connection);
    let other = client.clone();
    connection.push("connect", Vec::new()).unwrap();

    client.close().await;

    assert!(connection.is_closed());
    assert!(matches!(other.state().connected(), Err(Error::State(StateError::StateIsNil))));
    assert!(!other.occurred(EventKind::Connect));
    assert!(matches!(
        other.emit("getTags", Duration::from_millis(10), Vec::new()).await,
        Err(Error::Transport(TransportError::Closed))
    ));
    assert!(logs_contain("Client closed"));
}
