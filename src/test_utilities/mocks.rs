use std::collections::HashMap;
use std::sync::Mutex;

use futures::FutureExt;
use serde_json::{json, Value};

use crate::config;
use crate::rpc::{RpcCaller, RpcFuture};
use crate::{Error, Result};

pub const MOCK_HEAD_BLOCK_NUMBER: u32 = 34294;
pub const MOCK_HEAD_BLOCK_ID: &str = "000085f685abf4dc3c8c9ef0a1cf4e2c0a31fe0e";

/// Answers `call` requests from canned per-method responses and records
/// every request it sees.
#[derive(Default)]
pub struct MockCaller {
    responses: HashMap<String, Value>,
    errors: HashMap<String, (i64, String)>,
    calls: Mutex<Vec<(u64, String, Vec<Value>)>>,
}

impl MockCaller {
    pub fn new() -> Self {
        MockCaller::default()
    }

    /// A node on the BitShares chain with a fixed head block.
    pub fn bitshares() -> Self {
        MockCaller::new()
            .with_response("get_chain_id", json!(config::BITSHARES_CHAIN_ID))
            .with_response("get_dynamic_global_properties", mock_dynamic_global_properties())
            .with_response("network_broadcast", json!(2))
            .with_response("broadcast_transaction", Value::Null)
    }

    pub fn with_response(mut self, method: &str, response: Value) -> Self {
        self.responses.insert(method.to_string(), response);
        self
    }

    pub fn with_error(mut self, method: &str, code: i64, message: &str) -> Self {
        self.errors
            .insert(method.to_string(), (code, message.to_string()));
        self
    }

    pub fn get_calls(&self) -> Vec<(u64, String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_calls_to(&self, method: &str) -> Vec<(u64, Vec<Value>)> {
        self.get_calls()
            .into_iter()
            .filter(|(_, called, _)| called == method)
            .map(|(api_id, _, args)| (api_id, args))
            .collect()
    }

    fn answer(&self, api_id: u64, method: &str, args: Vec<Value>) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((api_id, method.to_string(), args));
        if let Some((code, message)) = self.errors.get(method) {
            return Err(Error::Rpc {
                code: *code,
                message: message.clone(),
            });
        }
        self.responses.get(method).cloned().ok_or_else(|| Error::Rpc {
            code: -32601,
            message: format!("no mock response for {}", method),
        })
    }
}

impl RpcCaller for MockCaller {
    fn call<'a>(&'a self, api_id: u64, method: &'a str, args: Vec<Value>) -> RpcFuture<'a> {
        futures::future::ready(self.answer(api_id, method, args)).boxed()
    }
}

pub fn mock_dynamic_global_properties() -> Value {
    json!({
        "id": "2.1.0",
        "head_block_number": MOCK_HEAD_BLOCK_NUMBER,
        "head_block_id": MOCK_HEAD_BLOCK_ID,
        "time": "2016-04-06T08:29:27",
        "current_witness": "1.6.12",
        "next_maintenance_time": "2016-04-06T09:00:00",
        "last_budget_time": "2016-04-06T08:00:00",
        "witness_budget": 91200000,
        "accounts_registered_this_interval": 4,
        "recently_missed_count": 0,
        "current_aslot": 5812367,
        "recent_slots_filled": "340282366920938463463374607431768211455",
        "dynamic_flags": 0,
        "last_irreversible_block_num": 34280
    })
}
