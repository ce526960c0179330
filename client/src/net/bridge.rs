//! Browser transport backed by the page's real-time database client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page loads the vendor SDK and hands us a small facade object with
//! `signIn`, `pushKey`, `set`, `removeOnDisconnect`, `on` and `off`. This
//! module binds that object and adapts it to [`Transport`]. Values cross the
//! boundary as JSON text.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use serde_json::Value;
use wasm_bindgen::prelude::*;

use super::channel::{Listener, Transport};
use crate::error::ClientError;

#[wasm_bindgen]
extern "C" {
    /// Page-provided database facade.
    pub type Database;

    #[wasm_bindgen(method, catch, js_name = signIn)]
    async fn sign_in(this: &Database, token: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = pushKey)]
    fn push_key(this: &Database, parent: &str) -> String;

    #[wasm_bindgen(method)]
    fn set(this: &Database, path: &str, value: JsValue);

    #[wasm_bindgen(method, js_name = removeOnDisconnect)]
    fn remove_on_disconnect(this: &Database, path: &str);

    #[wasm_bindgen(method)]
    fn on(this: &Database, path: &str, callback: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(method)]
    fn off(this: &Database, path: &str);
}

/// [`Transport`] over the page's database facade.
pub struct JsTransport {
    db: Database,
    callbacks: RefCell<HashMap<String, Closure<dyn FnMut(JsValue)>>>,
}

impl JsTransport {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db, callbacks: RefCell::new(HashMap::new()) }
    }
}

fn to_json(value: &JsValue) -> Value {
    if value.is_undefined() || value.is_null() {
        return Value::Null;
    }
    let text = js_sys::JSON::stringify(value).map(String::from).unwrap_or_default();
    serde_json::from_str(&text).unwrap_or_else(|e| {
        log::warn!("unreadable value from channel: {e}");
        Value::Null
    })
}

fn to_js(value: &Value) -> JsValue {
    js_sys::JSON::parse(&value.to_string()).unwrap_or(JsValue::NULL)
}

fn field(error: &JsValue, name: &str) -> String {
    js_sys::Reflect::get(error, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

impl Transport for JsTransport {
    fn sign_in(&self, token: &str) -> impl Future<Output = Result<(), ClientError>> {
        async move {
            match self.db.sign_in(token).await {
                Ok(_) => Ok(()),
                Err(e) => Err(ClientError::Transport { code: field(&e, "code"), message: field(&e, "message") }),
            }
        }
    }

    fn push_key(&self, parent: &str) -> String {
        self.db.push_key(parent)
    }

    fn set(&self, path: &str, value: Value) {
        self.db.set(path, to_js(&value));
    }

    fn remove_on_disconnect(&self, path: &str) {
        self.db.remove_on_disconnect(path);
    }

    fn listen(&self, path: &str, mut listener: Listener) {
        let callback = Closure::wrap(Box::new(move |value: JsValue| listener(to_json(&value))) as Box<dyn FnMut(JsValue)>);
        self.db.off(path);
        self.db.on(path, &callback);
        self.callbacks.borrow_mut().insert(path.to_owned(), callback);
    }

    fn unlisten(&self, path: &str) {
        self.db.off(path);
        self.callbacks.borrow_mut().remove(path);
    }
}
