//! JSON-RPC access to Graphene nodes.
//!
//! Nodes expose their APIs through a single `call` method whose params are
//! `[api_id, method, args]`. Both transports implement [`RpcCaller`], and the
//! typed helpers in [`api`] work against either.
pub mod api;
pub mod http;
pub mod websocket;

use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{Error, Result};

pub use api::{
    broadcast_transaction, get_chain_id, get_dynamic_global_properties,
    get_potential_signatures, get_required_fees, get_required_signatures,
    DynamicGlobalProperties, DATABASE_API_ID, LOGIN_API_ID,
};
pub use http::HttpClient;
pub use websocket::WsClient;

pub type RpcFuture<'a> = BoxFuture<'a, Result<Value>>;

/// Issues one `call` request and resolves to its `result`.
pub trait RpcCaller: Send + Sync {
    fn call<'a>(&'a self, api_id: u64, method: &'a str, args: Vec<Value>) -> RpcFuture<'a>;
}

impl<T: RpcCaller + ?Sized> RpcCaller for Box<T> {
    fn call<'a>(&'a self, api_id: u64, method: &'a str, args: Vec<Value>) -> RpcFuture<'a> {
        (**self).call(api_id, method, args)
    }
}

/// Opens a client for `url`, picking the transport from its scheme.
pub async fn connect(url: &str, timeout: std::time::Duration) -> Result<Box<dyn RpcCaller>> {
    match url::Url::parse(url)?.scheme() {
        "ws" | "wss" => Ok(Box::new(WsClient::connect(url, timeout).await?)),
        "http" | "https" => Ok(Box::new(HttpClient::new(url, timeout)?)),
        other => Err(Error::Transport(format!("unsupported scheme {:?}", other))),
    }
}

pub(crate) fn request_body(id: u64, api_id: u64, method: &str, args: Vec<Value>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "call",
        "params": [api_id, method, args],
    })
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Splits a response into its request id and outcome. An `error` member
/// wins over `result`; a response with neither resolves to null.
pub(crate) fn parse_response(mut response: Value) -> Result<(Option<u64>, Result<Value>)> {
    let object = match response.as_object_mut() {
        Some(object) => object,
        None => {
            return Err(Error::InvalidData(format!(
                "rpc response is not an object: {}",
                response
            )))
        }
    };
    let id = object.get("id").and_then(|id| match id {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    });

    if let Some(error) = object.remove("error") {
        if !error.is_null() {
            // a malformed error still has to reach the waiting call
            let error = match serde_json::from_value::<RpcErrorObject>(error.clone()) {
                Ok(parsed) => Error::Rpc {
                    code: parsed.code,
                    message: parsed.message,
                },
                Err(_) => Error::Rpc {
                    code: 0,
                    message: error.to_string(),
                },
            };
            return Ok((id, Err(error)));
        }
    }
    Ok((id, Ok(object.remove("result").unwrap_or(Value::Null))))
}
