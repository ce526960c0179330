//! Presence and subscription adapter over the real-time transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server pushes game state by writing to per-game paths of a hosted
//! real-time database. `Channel` is the only code that talks to it: it signs
//! in with a server-issued token, keeps a liveness marker for the user and
//! forwards non-empty values at subscribed paths to handlers.
//!
//! ERROR HANDLING
//! ==============
//! Sign-in failures are logged with their code and message and otherwise
//! ignored; the page keeps working without live updates. Reconnection is the
//! transport's business, nothing here retries.

#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use std::future::Future;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::error::ClientError;

/// Path the transport uses to report whether it is connected.
pub const CONNECTED_PATH: &str = ".info/connected";

/// Callback receiving the value at a path each time it changes.
pub type Listener = Box<dyn FnMut(Value)>;

/// Operations the adapter needs from a real-time database client.
pub trait Transport {
    /// Sign in with a custom token.
    fn sign_in(&self, token: &str) -> impl Future<Output = Result<(), ClientError>>;
    /// Create a fresh child key under `parent`.
    fn push_key(&self, parent: &str) -> String;
    fn set(&self, path: &str, value: Value);
    /// Ask the server to delete `path` when this client disconnects.
    fn remove_on_disconnect(&self, path: &str);
    /// Replace the listener on `path`.
    fn listen(&self, path: &str, listener: Listener);
    fn unlisten(&self, path: &str);
}

/// Whether a payload carries nothing worth dispatching: the JSON values a
/// browser treats as falsy (null, `false`, zero and the empty string). Empty
/// arrays and objects are dispatched.
#[must_use]
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Presence and subscriptions for one page.
pub struct Channel<T: Transport> {
    transport: Rc<T>,
}

impl<T: Transport + 'static> Channel<T> {
    #[must_use]
    pub fn new(transport: Rc<T>) -> Self {
        Self { transport }
    }

    /// Sign in. Returns whether it worked; failures are only logged.
    pub async fn authenticate(&self, token: &str) -> bool {
        match self.transport.sign_in(token).await {
            Ok(()) => {
                log::debug!("channel signed in");
                true
            }
            Err(e) => {
                log::error!("channel login failed, error code: {}", e.code());
                log::error!("error message: {e}");
                false
            }
        }
    }

    /// Register a liveness marker for `user_id` under `connection/<user_id>`.
    ///
    /// The marker is `true` while the transport reports a connection and
    /// `false` otherwise, and is removed server-side on disconnect. Returns
    /// the marker path.
    pub fn announce_presence(&self, user_id: &str) -> String {
        let parent = format!("connection/{user_id}");
        let path = format!("{parent}/{}", self.transport.push_key(&parent));
        let weak: Weak<T> = Rc::downgrade(&self.transport);
        let marker = path.clone();
        self.transport.listen(
            CONNECTED_PATH,
            Box::new(move |value| {
                let Some(transport) = weak.upgrade() else {
                    return;
                };
                if value.as_bool() == Some(true) {
                    transport.remove_on_disconnect(&marker);
                    transport.set(&marker, Value::Bool(true));
                } else {
                    transport.set(&marker, Value::Bool(false));
                }
            }),
        );
        log::debug!("presence marker at {path}");
        path
    }

    /// Call `handler` with each non-empty value written at `path`.
    pub fn subscribe(&self, path: &str, mut handler: impl FnMut(Value) + 'static) {
        let at = path.to_owned();
        self.transport.listen(
            path,
            Box::new(move |value| {
                if is_empty_payload(&value) {
                    log::debug!("ignoring empty payload at {at}");
                    return;
                }
                handler(value);
            }),
        );
    }

    pub fn unsubscribe(&self, path: &str) {
        self.transport.unlisten(path);
    }
}
