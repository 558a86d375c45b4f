use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kuma_client::CallbackTable;
use kuma_client::Connection;
use kuma_client::EventCallback;
use kuma_client::HandlerRegistrar;
use kuma_client::Result;
use kuma_client::TransportError;
use parking_lot::Mutex;
use serde_json::Value;

type Reply = Box<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Scripted stand-in for an Uptime Kuma server.
#[derive(Default)]
pub struct FakeServer {
    callbacks: CallbackTable,
    replies: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<String>>,
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(
        &self,
        event: &str,
        reply: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) {
        self.replies.lock().insert(event.to_string(), Box::new(reply));
    }

    pub fn push(
        &self,
        event: &str,
        args: Vec<Value>,
    ) {
        if let Err(e) = self.callbacks.dispatch(event, &args) {
            panic!("push {event} failed: {e}");
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

impl HandlerRegistrar for FakeServer {
    fn on(
        &self,
        event: &str,
        callback: EventCallback,
    ) -> Result<()> {
        self.callbacks.on(event, callback);
        Ok(())
    }
}

#[async_trait]
impl Connection for FakeServer {
    async fn ack(
        &self,
        event: &str,
        timeout: Duration,
        args: Vec<Value>,
    ) -> Result<Value> {
        self.requests.lock().push(event.to_string());
        match self.replies.lock().get(event) {
            Some(reply) => Ok(reply(&args)),
            None => Err(TransportError::AckTimeout {
                event: event.to_string(),
                timeout,
            }
            .into()),
        }
    }

    async fn close(&self) {}
}
