use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;

use super::*;
use crate::CallbackTable;
use crate::Error;
use crate::MockHandlerRegistrar;
use crate::State;
use crate::TransportError;

#[test]
fn new_registry_covers_every_kind() {
    let registry = HandlerRegistry::new(&State::new());

    assert_eq!(registry.len(), EventKind::ALL.len());
    for kind in EventKind::ALL {
        assert_eq!(registry.get(kind).event(), kind);
        assert!(!registry.occurred(kind));
    }
}

#[test]
#[should_panic(expected = "no handler registered for event info")]
fn get_panics_for_unregistered_kind() {
    let state = State::new();
    let handlers: Vec<Arc<dyn EventHandler>> = vec![Arc::new(ConnectHandler::new(state))];
    let registry = HandlerRegistry::with_handlers(handlers);

    assert!(registry.try_get(EventKind::Info).is_none());
    registry.get(EventKind::Info);
}

#[test]
fn register_all_registers_each_wire_name_once() {
    let registry = HandlerRegistry::new(&State::new());
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut registrar = MockHandlerRegistrar::new();
    {
        let seen = seen.clone();
        registrar
            .expect_on()
            .times(EventKind::ALL.len())
            .returning(move |event, _callback| {
                seen.lock().push(event.to_string());
                Ok(())
            });
    }

    registry.register_all(&registrar).unwrap();

    let names: HashSet<String> = seen.lock().iter().cloned().collect();
    let expected: HashSet<String> = EventKind::ALL.iter().map(|k| k.name().to_string()).collect();
    assert_eq!(names, expected);
}

#[test]
fn register_all_stops_on_registration_failure() {
    let registry = HandlerRegistry::new(&State::new());

    let mut registrar = MockHandlerRegistrar::new();
    registrar.expect_on().times(1).returning(|event, _callback| {
        Err(TransportError::Registration {
            event: event.to_string(),
            reason: "socket closed".into(),
        }
        .into())
    });

    let result = registry.register_all(&registrar);

    assert!(matches!(
        result,
        Err(Error::Transport(TransportError::Registration { event, .. })) if event == "connect"
    ));
}

#[test]
fn registered_callbacks_drive_occurrence() {
    let state = State::new();
    let registry = HandlerRegistry::new(&state);
    let table = CallbackTable::new();
    registry.register_all(&table).unwrap();

    table.dispatch("connect", &[]).unwrap();
    table.dispatch("info", &[json!({ "version": "2.0.0" })]).unwrap();
    table
        .dispatch("heartbeatList", &[json!(1), json!([{ "id": 1, "status": 1 }]), json!(true)])
        .unwrap();

    assert!(registry.occurred(EventKind::Connect));
    assert!(registry.occurred(EventKind::Info));
    assert!(registry.occurred(EventKind::HeartbeatList));
    assert!(registry.occurred(EventKind::Heartbeat));
    assert!(!registry.occurred(EventKind::ImportantHeartbeatList));
    assert!(!registry.occurred(EventKind::MonitorList));
    assert!(!registry.occurred(EventKind::AutoLogin));
}

#[test]
fn single_handler_registers_itself() {
    let state = State::new();
    let handler = Arc::new(AutoLoginHandler::new(state.clone()));
    let table = CallbackTable::new();

    handler.clone().register(&table).unwrap();
    table.dispatch("autoLogin", &[]).unwrap();

    assert!(handler.occurred());
}

struct CountingHandler {
    registrations: Mutex<usize>,
}

impl EventHandler for CountingHandler {
    fn event(&self) -> EventKind {
        EventKind::Info
    }

    fn handle(
        &self,
        _args: &[serde_json::Value],
    ) -> Result<()> {
        Ok(())
    }

    fn occurred(&self) -> bool {
        false
    }

    fn register(
        self: Arc<Self>,
        registrar: &dyn HandlerRegistrar,
    ) -> Result<()> {
        *self.registrations.lock() += 1;
        registrar.on("info", Arc::new(move |args: &[serde_json::Value]| self.handle(args)))
    }
}

#[test]
fn register_all_goes_through_each_handler_register() {
    let handler = Arc::new(CountingHandler {
        registrations: Mutex::new(0),
    });
    let registry = HandlerRegistry::with_handlers(vec![handler.clone() as Arc<dyn EventHandler>]);
    let table = CallbackTable::new();

    registry.register_all(&table).unwrap();

    assert_eq!(*handler.registrations.lock(), 1);
    table.dispatch("info", &[]).unwrap();
}
