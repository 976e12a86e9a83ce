use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{FutureExt, SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{event, Level};

use super::{parse_response, request_body, RpcCaller, RpcFuture};
use crate::{Error, Result};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// In-flight calls keyed by request id. Once `closed` is set no new call is
/// registered.
#[derive(Default)]
struct PendingCalls {
    closed: bool,
    calls: HashMap<u64, oneshot::Sender<Result<Value>>>,
}

type Pending = Arc<Mutex<PendingCalls>>;

fn lock(pending: &Pending) -> std::sync::MutexGuard<'_, PendingCalls> {
    pending.lock().unwrap_or_else(|e| e.into_inner())
}

/// A JSON-RPC client over one WebSocket connection.
///
/// Requests are written through a shared sink and matched to responses by
/// id in a background reader task. When the socket goes away every
/// outstanding call resolves to [`Error::Shutdown`].
pub struct WsClient {
    url: String,
    write_sink: tokio::sync::Mutex<SplitSink<WsStream, Message>>,
    pending: Pending,
    next_id: AtomicU64,
    timeout: Duration,
    reader: JoinHandle<()>,
}

impl WsClient {
    pub async fn connect(url: &str, timeout: Duration) -> Result<WsClient> {
        let parsed = url::Url::parse(url)?;
        let (ws_stream, _) = connect_async(parsed).await?;
        event!(Level::INFO, "connected to {}", url);

        let (write_sink, read_stream) = ws_stream.split();
        let pending: Pending = Arc::new(Mutex::new(PendingCalls::default()));
        let reader = tokio::spawn(read_loop(read_stream, pending.clone(), url.to_string()));

        Ok(WsClient {
            url: url.to_string(),
            write_sink: tokio::sync::Mutex::new(write_sink),
            pending,
            next_id: AtomicU64::new(1),
            timeout,
            reader,
        })
    }

    pub fn get_url(&self) -> &str {
        &self.url
    }

    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_closed(&self) -> bool {
        lock(&self.pending).closed
    }

    /// Sends a close frame. Pending calls fail with `Shutdown` once the
    /// reader sees the socket end.
    pub async fn close(&self) -> Result<()> {
        let mut sink = self.write_sink.lock().await;
        sink.send(Message::Close(None)).await?;
        Ok(())
    }

    async fn call_inner(&self, api_id: u64, method: &str, args: Vec<Value>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let (sender, receiver) = oneshot::channel();
        {
            let mut pending = lock(&self.pending);
            if pending.closed {
                return Err(Error::Shutdown);
            }
            pending.calls.insert(id, sender);
        }

        let body = request_body(id, api_id, method, args);
        event!(Level::TRACE, "ws send {}", body);
        let sent = {
            let mut sink = self.write_sink.lock().await;
            sink.send(Message::Text(body.to_string())).await
        };
        if let Err(err) = sent {
            lock(&self.pending).calls.remove(&id);
            return Err(err.into());
        }

        match tokio::time::timeout(self.timeout, receiver).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::Shutdown),
            Err(_) => {
                lock(&self.pending).calls.remove(&id);
                event!(Level::WARN, "{} (call {}) timed out", method, id);
                Err(Error::Timeout)
            }
        }
    }
}

impl RpcCaller for WsClient {
    fn call<'a>(&'a self, api_id: u64, method: &'a str, args: Vec<Value>) -> RpcFuture<'a> {
        self.call_inner(api_id, method, args).boxed()
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        self.reader.abort();
        shut_down(&self.pending);
    }
}

async fn read_loop(mut read_stream: SplitStream<WsStream>, pending: Pending, url: String) {
    while let Some(result) = read_stream.next().await {
        match result {
            Ok(Message::Text(text)) => dispatch(&pending, &text),
            Ok(Message::Binary(data)) => match String::from_utf8(data) {
                Ok(text) => dispatch(&pending, &text),
                Err(_) => event!(Level::ERROR, "non utf-8 binary frame from {}", url),
            },
            Ok(Message::Close(frame)) => {
                event!(Level::INFO, "{} closed the connection: {:?}", url, frame);
                break;
            }
            Ok(_) => {}
            Err(error) => {
                event!(Level::ERROR, "error reading from {}: {}", url, error);
                break;
            }
        }
    }
    shut_down(&pending);
}

/// Marks the connection closed and fails every pending call.
fn shut_down(pending: &Pending) {
    let calls = {
        let mut pending = lock(pending);
        pending.closed = true;
        std::mem::take(&mut pending.calls)
    };
    for (_, sender) in calls {
        let _ = sender.send(Err(Error::Shutdown));
    }
}

fn dispatch(pending: &Pending, text: &str) {
    let message: Value = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(error) => {
            event!(Level::ERROR, "unparseable message {:?}: {}", text, error);
            return;
        }
    };
    if message.get("method").and_then(Value::as_str) == Some("notice") {
        event!(Level::DEBUG, "dropping notice {}", text);
        return;
    }

    match parse_response(message) {
        Ok((Some(id), result)) => {
            let sender = lock(pending).calls.remove(&id);
            match sender {
                Some(sender) => {
                    let _ = sender.send(result);
                }
                None => event!(Level::WARN, "response for unknown call {}", id),
            }
        }
        Ok((None, _)) => event!(Level::WARN, "response without id: {}", text),
        Err(error) => event!(Level::ERROR, "bad response {:?}: {}", text, error),
    }
}
