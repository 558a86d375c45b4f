use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::CallbackTable;
use crate::Connection;
use crate::EventCallback;
use crate::HandlerRegistrar;
use crate::Result;
use crate::TransportError;

pub type Responder = Box<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// In-process transport: the test plays the server by pushing events and
/// scripting acknowledgements.
#[derive(Default)]
pub struct LoopbackConnection {
    table: CallbackTable,
    responders: Mutex<HashMap<String, Responder>>,
    emitted: Mutex<Vec<(String, Vec<Value>)>>,
    closed: AtomicBool,
}

impl LoopbackConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answers every later `event` request with `responder(args)`.
    pub fn respond(
        &self,
        event: &str,
        responder: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) {
        self.responders.lock().insert(event.to_string(), Box::new(responder));
    }

    /// Delivers a server push event to every registered callback.
    pub fn push(
        &self,
        event: &str,
        args: Vec<Value>,
    ) -> Result<()> {
        self.table.dispatch(event, &args)
    }

    /// Requests sent so far, oldest first.
    pub fn emitted(&self) -> Vec<(String, Vec<Value>)> {
        self.emitted.lock().clone()
    }

    pub fn is_registered(
        &self,
        event: &str,
    ) -> bool {
        self.table.contains(event)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl HandlerRegistrar for LoopbackConnection {
    fn on(
        &self,
        event: &str,
        callback: EventCallback,
    ) -> Result<()> {
        self.table.on(event, callback);
        Ok(())
    }
}

#[async_trait]
impl Connection for LoopbackConnection {
    async fn ack(
        &self,
        event: &str,
        timeout: Duration,
        args: Vec<Value>,
    ) -> Result<Value> {
        if self.is_closed() {
            return Err(TransportError::Closed.into());
        }
        self.emitted.lock().push((event.to_string(), args.clone()));

        match self.responders.lock().get(event) {
            Some(responder) => responder(&args),
            None => Err(TransportError::AckTimeout {
                event: event.to_string(),
                timeout,
            }
            .into()),
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
