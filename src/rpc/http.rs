use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::FutureExt;
use serde_json::Value;

use super::{parse_response, request_body, RpcCaller, RpcFuture};
use crate::{Error, Result};

/// A JSON-RPC client posting each call to the node's HTTP endpoint.
pub struct HttpClient {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpClient {
    pub fn new(url: &str, timeout: Duration) -> Result<HttpClient> {
        url::Url::parse(url)?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpClient {
            client,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn get_url(&self) -> &str {
        &self.url
    }

    async fn call_inner(&self, api_id: u64, method: &str, args: Vec<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let body = request_body(id, api_id, method, args);
        log::trace!("http post {} {}", self.url, body);

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await
            .map_err(transport_error)?;
        let text = response.text().await.map_err(transport_error)?;
        let (_, result) = parse_response(serde_json::from_str(&text)?)?;
        result
    }
}

fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::from(err)
    }
}

impl RpcCaller for HttpClient {
    fn call<'a>(&'a self, api_id: u64, method: &'a str, args: Vec<Value>) -> RpcFuture<'a> {
        self.call_inner(api_id, method, args).boxed()
    }
}
