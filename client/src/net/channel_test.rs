use super::*;
use futures::executor::block_on;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

// =============================================================
// In-memory transport
// =============================================================

#[derive(Default)]
struct FakeTransport {
    reject_sign_in: bool,
    signed_in: Cell<bool>,
    next_key: Cell<u32>,
    values: RefCell<HashMap<String, Value>>,
    listeners: RefCell<HashMap<String, Listener>>,
    on_disconnect: RefCell<Vec<String>>,
}

impl FakeTransport {
    /// Deliver `value` at `path` the way the database would.
    fn emit(&self, path: &str, value: Value) {
        let taken = self.listeners.borrow_mut().remove(path);
        if let Some(mut listener) = taken {
            listener(value);
            self.listeners.borrow_mut().entry(path.to_owned()).or_insert(listener);
        }
    }

    fn value(&self, path: &str) -> Option<Value> {
        self.values.borrow().get(path).cloned()
    }
}

impl Transport for FakeTransport {
    fn sign_in(&self, _token: &str) -> impl Future<Output = Result<(), ClientError>> {
        let result = if self.reject_sign_in {
            Err(ClientError::Transport { code: "auth/invalid".into(), message: "bad token".into() })
        } else {
            self.signed_in.set(true);
            Ok(())
        };
        std::future::ready(result)
    }

    fn push_key(&self, _parent: &str) -> String {
        let key = self.next_key.get() + 1;
        self.next_key.set(key);
        format!("k{key}")
    }

    fn set(&self, path: &str, value: Value) {
        self.values.borrow_mut().insert(path.to_owned(), value);
    }

    fn remove_on_disconnect(&self, path: &str) {
        self.on_disconnect.borrow_mut().push(path.to_owned());
    }

    fn listen(&self, path: &str, listener: Listener) {
        self.listeners.borrow_mut().insert(path.to_owned(), listener);
    }

    fn unlisten(&self, path: &str) {
        self.listeners.borrow_mut().remove(path);
    }
}

fn channel() -> (Rc<FakeTransport>, Channel<FakeTransport>) {
    let transport = Rc::new(FakeTransport::default());
    (Rc::clone(&transport), Channel::new(transport))
}

// =============================================================
// Authentication
// =============================================================

#[test]
fn authenticate_succeeds() {
    let (transport, channel) = channel();
    assert!(block_on(channel.authenticate("token")));
    assert!(transport.signed_in.get());
}

#[test]
fn authenticate_failure_is_not_fatal() {
    let transport = Rc::new(FakeTransport { reject_sign_in: true, ..FakeTransport::default() });
    let channel = Channel::new(Rc::clone(&transport));
    assert!(!block_on(channel.authenticate("token")));
    assert!(!transport.signed_in.get());
}

// =============================================================
// Presence
// =============================================================

#[test]
fn presence_marker_tracks_connection() {
    let (transport, channel) = channel();
    let path = channel.announce_presence("u42");
    assert_eq!(path, "connection/u42/k1");
    assert_eq!(transport.value(&path), None);

    transport.emit(CONNECTED_PATH, json!(true));
    assert_eq!(transport.value(&path), Some(json!(true)));
    assert_eq!(*transport.on_disconnect.borrow(), vec![path.clone()]);

    transport.emit(CONNECTED_PATH, json!(false));
    assert_eq!(transport.value(&path), Some(json!(false)));
}

#[test]
fn presence_listener_survives_channel_drop() {
    let (transport, channel) = channel();
    let path = channel.announce_presence("u1");
    drop(channel);
    transport.emit(CONNECTED_PATH, json!(true));
    assert_eq!(transport.value(&path), Some(json!(true)));
}

// =============================================================
// Subscriptions
// =============================================================

#[test]
fn subscribe_forwards_non_empty_values() {
    let (transport, channel) = channel();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    channel.subscribe("game/g1/u1", move |v| sink.borrow_mut().push(v));

    transport.emit("game/g1/u1", json!({"over": true}));
    transport.emit("game/g1/u1", Value::Null);
    transport.emit("game/g1/u1", json!({}));
    transport.emit("game/g1/u1", json!(""));
    transport.emit("game/g1/u1", json!(7));

    assert_eq!(*seen.borrow(), vec![json!({"over": true}), json!({}), json!(7)]);
}

#[test]
fn unsubscribe_stops_delivery() {
    let (transport, channel) = channel();
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    channel.subscribe("p", move |_| counter.set(counter.get() + 1));
    transport.emit("p", json!(1));
    channel.unsubscribe("p");
    transport.emit("p", json!(2));
    assert_eq!(count.get(), 1);
}

#[test]
fn empty_payload_rules() {
    assert!(is_empty_payload(&Value::Null));
    assert!(is_empty_payload(&json!(false)));
    assert!(is_empty_payload(&json!(0)));
    assert!(is_empty_payload(&json!("")));
    assert!(!is_empty_payload(&json!([])));
    assert!(!is_empty_payload(&json!({})));
    assert!(!is_empty_payload(&json!(true)));
    assert!(!is_empty_payload(&json!("x")));
    assert!(!is_empty_payload(&json!([0])));
}
