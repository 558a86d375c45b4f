use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::AutoLoginHandler;
use super::ConnectHandler;
use super::DisconnectHandler;
use super::ErrorHandler;
use super::EventHandler;
use super::EventKind;
use super::HeartbeatHandler;
use super::HeartbeatListHandler;
use super::ImportantHeartbeatListHandler;
use super::InfoHandler;
use super::MessageHandler;
use super::MonitorListHandler;
use crate::HandlerRegistrar;
use crate::Result;
use crate::State;

/// One handler per [`EventKind`], all writing the same store.
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, Arc<dyn EventHandler>>,
}

impl HandlerRegistry {
    /// Builds the full set of handlers over `state`.
    pub fn new(state: &State) -> Self {
        let handlers: Vec<Arc<dyn EventHandler>> = vec![
            Arc::new(ConnectHandler::new(state.clone())),
            Arc::new(DisconnectHandler::new(state.clone())),
            Arc::new(MessageHandler::new(state.clone())),
            Arc::new(ErrorHandler::new(state.clone())),
            Arc::new(InfoHandler::new(state.clone())),
            Arc::new(HeartbeatHandler::new(state.clone())),
            Arc::new(HeartbeatListHandler::new(state.clone())),
            Arc::new(ImportantHeartbeatListHandler::new(state.clone())),
            Arc::new(AutoLoginHandler::new(state.clone())),
            Arc::new(MonitorListHandler::new(state.clone())),
        ];
        Self::with_handlers(handlers)
    }

    /// Registry holding exactly `handlers`. A later handler for the same
    /// kind replaces an earlier one.
    pub fn with_handlers(handlers: Vec<Arc<dyn EventHandler>>) -> Self {
        Self {
            handlers: handlers.into_iter().map(|h| (h.event(), h)).collect(),
        }
    }

    /// Handler for `kind`.
    ///
    /// # Panics
    /// If no handler is registered for `kind`. The set of kinds is closed, so
    /// this is a wiring bug rather than a runtime condition.
    pub fn get(
        &self,
        kind: EventKind,
    ) -> &Arc<dyn EventHandler> {
        match self.handlers.get(&kind) {
            Some(handler) => handler,
            None => panic!("no handler registered for event {kind}"),
        }
    }

    pub fn try_get(
        &self,
        kind: EventKind,
    ) -> Option<&Arc<dyn EventHandler>> {
        self.handlers.get(&kind)
    }

    pub fn occurred(
        &self,
        kind: EventKind,
    ) -> bool {
        self.get(kind).occurred()
    }

    /// Registers every handler against the transport, in [`EventKind::ALL`]
    /// order.
    pub fn register_all(
        &self,
        registrar: &dyn HandlerRegistrar,
    ) -> Result<()> {
        for kind in EventKind::ALL {
            if let Some(handler) = self.handlers.get(&kind) {
                debug!(event = %kind, "Registering event handler");
                handler.clone().register(registrar)?;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
