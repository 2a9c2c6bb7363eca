//! In-process CDP endpoint for tests.

use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

pub(crate) enum Reply {
    Ok(Value),
    Error(i64, &'static str),
    /// Never answer.
    Silent,
}

type Handler = Arc<dyn Fn(&str, &Value) -> Reply + Send + Sync>;

pub(crate) struct MockBrowser {
    pub ws_url: String,
    requests: Arc<Mutex<Vec<Value>>>,
    task: tokio::task::JoinHandle<()>,
}

impl MockBrowser {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Reply + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let ws_url = format!("ws://{}/devtools/browser/mock", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler: Handler = Arc::new(handler);

        let task = {
            let requests = requests.clone();
            tokio::spawn(async move {
                while let Ok((stream, _)) = listener.accept().await {
                    let requests = requests.clone();
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let Ok(ws) = tokio_tungstenite::accept_async(stream).await else {
                            return;
                        };
                        let (mut tx, mut rx) = ws.split();
                        while let Some(Ok(Message::Text(text))) = rx.next().await {
                            let request: Value = serde_json::from_str(&text).unwrap();
                            requests.lock().push(request.clone());

                            let method = request["method"].as_str().unwrap_or_default();
                            let params = request.get("params").cloned().unwrap_or(Value::Null);
                            let mut response = match handler(method, &params) {
                                Reply::Ok(result) => json!({"id": request["id"], "result": result}),
                                Reply::Error(code, message) => json!({
                                    "id": request["id"],
                                    "error": {"code": code, "message": message}
                                }),
                                Reply::Silent => continue,
                            };
                            if let Some(session_id) = request.get("sessionId") {
                                response["sessionId"] = session_id.clone();
                            }

                            if method == "Target.attachToTarget" {
                                let event = json!({"method": "Target.attachedToTarget", "params": {}});
                                let _ = tx.send(Message::Text(event.to_string().into())).await;
                            }
                            let _ = tx.send(Message::Text(response.to_string().into())).await;
                        }
                    });
                }
            })
        };

        Self {
            ws_url,
            requests,
            task,
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().clone()
    }

    pub fn requests_for(&self, method: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|r| r["method"] == method)
            .collect()
    }
}

impl Drop for MockBrowser {
    fn drop(&mut self) {
        self.task.abort();
    }
}
