//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use crate::error::CdpError;
use crate::protocol::{BrowserVersion, CdpRequest, CdpResponse, TargetInfo};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

/// Upper bound for a single command round trip.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Command dispatch over the browser socket.
struct Transport {
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: PendingMap,
    call_timeout: Duration,
}

impl Transport {
    /// Send a command, routed to `session_id` when given, and wait for its result.
    async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(|s| s.to_string()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(self.call_timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }
}

/// CDP client connected to the browser endpoint.
///
/// All sessions are flattened onto this one connection and addressed by
/// `sessionId`.
pub struct CdpClient {
    browser_ws_url: String,
    transport: Transport,
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to the browser at `endpoint`.
    ///
    /// An `http(s)://` endpoint is resolved through `/json/version`; a
    /// `ws(s)://` endpoint is used as the browser WebSocket directly.
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let ws_url = if endpoint.starts_with("ws://") || endpoint.starts_with("wss://") {
            endpoint.to_string()
        } else {
            let version = Self::browser_version(endpoint).await?;
            debug!("Connected to browser: {}", version.browser);
            version.web_socket_debugger_url
        };
        Self::connect_ws(&ws_url, DEFAULT_CALL_TIMEOUT).await
    }

    /// Fetch `/json/version` from an HTTP debugging endpoint.
    pub async fn browser_version(endpoint: &str) -> Result<BrowserVersion, CdpError> {
        let version_url = format!("{}/json/version", endpoint.trim_end_matches('/'));
        debug!("Fetching browser version from {}", version_url);

        reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))
    }

    /// Connect straight to a browser WebSocket URL.
    pub async fn connect_ws(ws_url: &str, call_timeout: Duration) -> Result<Self, CdpError> {
        let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));

        let recv_task = {
            let pending = pending.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending).await;
            })
        };

        debug!("CDP client connected to {}", ws_url);

        Ok(Self {
            browser_ws_url: ws_url.to_string(),
            transport: Transport {
                ws_tx: tokio::sync::Mutex::new(ws_sink),
                request_id: AtomicU64::new(1),
                pending,
                call_timeout,
            },
            recv_task,
        })
    }

    /// WebSocket receive loop. Pending callers are released when it ends.
    async fn receive_loop(mut ws_source: WsSource, pending: PendingMap) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(resp) => Self::dispatch(resp, &pending),
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
        pending.lock().clear();
    }

    fn dispatch(resp: CdpResponse, pending: &PendingMap) {
        let Some(id) = resp.id else {
            if let Some(method) = resp.method {
                trace!(session = ?resp.session_id, "Ignoring CDP event {}", method);
            }
            return;
        };

        let Some(tx) = pending.lock().remove(&id) else {
            debug!("Response for unknown request {}", id);
            return;
        };

        let result = match resp.error {
            Some(error) => Err(CdpError::Protocol {
                code: error.code,
                message: error.message,
            }),
            None => Ok(resp.result.unwrap_or(Value::Null)),
        };
        let _ = tx.send(result);
    }

    /// Send a browser-level CDP command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Send a command to an attached session.
    pub async fn call_session(
        &self,
        session_id: &str,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, CdpError> {
        self.transport.call(method, params, Some(session_id)).await
    }

    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    /// All targets known to the browser.
    pub async fn get_targets(&self) -> Result<Vec<TargetInfo>, CdpError> {
        let result = self.call("Target.getTargets", None).await?;
        let targets: Vec<TargetInfo> = serde_json::from_value(result["targetInfos"].clone())?;
        Ok(targets)
    }

    /// Attach to `target_id` in flattened mode, returning the session id.
    pub async fn attach(&self, target_id: &str) -> Result<String, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        result["sessionId"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))
    }

    pub async fn detach(&self, session_id: &str) -> Result<(), CdpError> {
        self.call(
            "Target.detachFromTarget",
            Some(json!({"sessionId": session_id})),
        )
        .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
