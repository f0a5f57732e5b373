//! Streamable HTTP transport.
//!
//! Every outbound message is POSTed to the endpoint. The server answers
//! with either a JSON body or an event stream; both are queued as inbound
//! messages for [`Transport::receive`]. Event streams are drained by a
//! background task so server pushes arrive as they are produced.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use mcpdock_core::domain::TransportKind;
use mcpdock_core::ports::Logger;

use super::Transport;
use super::sse::SseDecoder;
use crate::error::TransportError;

/// Header carrying the server-assigned session id.
pub const SESSION_HEADER: &str = "Mcp-Session-Id";

const ACCEPT_VALUE: &str = "application/json, text/event-stream";

/// Transport over HTTP POST with JSON or SSE responses.
pub struct HttpTransport {
    client: Client,
    url: Url,
    auth_token: Option<String>,
    session_id: Mutex<Option<String>>,
    inbound_tx: Mutex<Option<mpsc::UnboundedSender<Value>>>,
    inbound_rx: Mutex<mpsc::UnboundedReceiver<Value>>,
    streams: Mutex<Vec<JoinHandle<()>>>,
    logger: Arc<dyn Logger>,
}

impl HttpTransport {
    pub fn new(
        client: Client,
        url: Url,
        auth_token: Option<String>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            url,
            auth_token,
            session_id: Mutex::new(None),
            inbound_tx: Mutex::new(Some(tx)),
            inbound_rx: Mutex::new(rx),
            streams: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Session id assigned by the server, once known.
    pub async fn session_id(&self) -> Option<String> {
        self.session_id.lock().await.clone()
    }

    async fn spawn_stream(&self, response: reqwest::Response, tx: mpsc::UnboundedSender<Value>) {
        let logger = Arc::clone(&self.logger);
        let handle = tokio::spawn(pump_event_stream(response, tx, logger));

        let mut streams = self.streams.lock().await;
        streams.retain(|stream| !stream.is_finished());
        streams.push(handle);
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, message: &Value) -> Result<(), TransportError> {
        let tx = self
            .inbound_tx
            .lock()
            .await
            .clone()
            .ok_or(TransportError::Closed)?;

        let mut request = self
            .client
            .post(self.url.clone())
            .header(ACCEPT, ACCEPT_VALUE)
            .json(message);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        if let Some(session) = self.session_id.lock().await.clone() {
            request = request.header(SESSION_HEADER, session);
        }

        let response = request.send().await?;

        if let Some(session) = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            *self.session_id.lock().await = Some(session.to_string());
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Http(format!("{status}: {}", body.trim())));
        }
        if status == StatusCode::ACCEPTED || status == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("text/event-stream") {
            self.spawn_stream(response, tx).await;
            return Ok(());
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        let value: Value = serde_json::from_slice(&body)?;
        enqueue(value, &tx);
        Ok(())
    }

    async fn receive(&self) -> Result<Option<Value>, TransportError> {
        Ok(self.inbound_rx.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), TransportError> {
        self.inbound_tx.lock().await.take();
        for stream in self.streams.lock().await.drain(..) {
            stream.abort();
        }

        let Some(session) = self.session_id.lock().await.take() else {
            return Ok(());
        };
        let mut request = self
            .client
            .delete(self.url.clone())
            .header(SESSION_HEADER, session);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        if let Err(e) = request.send().await {
            self.logger
                .debug(&format!("Session termination request failed: {e}"));
        }
        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Http
    }
}

/// Queue a message, unpacking JSON-RPC batches.
fn enqueue(value: Value, tx: &mpsc::UnboundedSender<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                let _ = tx.send(item);
            }
        }
        other => {
            let _ = tx.send(other);
        }
    }
}

async fn pump_event_stream(
    response: reqwest::Response,
    tx: mpsc::UnboundedSender<Value>,
    logger: Arc<dyn Logger>,
) {
    let mut stream = response.bytes_stream();
    let mut decoder = SseDecoder::new();

    let dispatch = |data: &str| match serde_json::from_str::<Value>(data) {
        Ok(value) => enqueue(value, &tx),
        Err(e) => logger.debug(&format!("Ignoring undecodable event payload: {e}")),
    };

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                for event in decoder.feed(&bytes) {
                    if event.is_message() {
                        dispatch(&event.data);
                    }
                }
            }
            Err(e) => {
                logger.warn(&format!("Event stream interrupted: {e}"));
                return;
            }
        }
    }

    if let Some(event) = decoder.finish() {
        if event.is_message() {
            dispatch(&event.data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpdock_core::ports::NoopLogger;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, return the raw request and reply with `response`.
    async fn serve_once(listener: &TcpListener, response: String) -> String {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0_u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let length = text
                    .lines()
                    .find_map(|line| {
                        line.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + length {
                    break;
                }
            }
            if n == 0 {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        String::from_utf8_lossy(&request).to_string()
    }

    fn transport(addr: std::net::SocketAddr, token: Option<&str>) -> HttpTransport {
        HttpTransport::new(
            Client::new(),
            Url::parse(&format!("http://{addr}/mcp")).unwrap(),
            token.map(str::to_string),
            Arc::new(NoopLogger),
        )
    }

    #[tokio::test]
    async fn test_json_response_is_queued_and_session_captured() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = r#"{"jsonrpc":"2.0","id":1,"result":{}}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nMcp-Session-Id: abc123\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let server = tokio::spawn(async move { serve_once(&listener, response).await });

        let transport = transport(addr, Some("tok"));
        transport
            .send(&json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}))
            .await
            .unwrap();

        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("post /mcp"));
        assert!(request.contains("accept: application/json, text/event-stream"));
        assert!(request.contains("authorization: bearer tok"));

        assert_eq!(
            transport.receive().await.unwrap(),
            Some(json!({"jsonrpc": "2.0", "id": 1, "result": {}}))
        );
        assert_eq!(transport.session_id().await.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_event_stream_response_is_queued() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = "event: message\ndata: {\"jsonrpc\":\"2.0\",\"method\":\"notifications/progress\"}\n\ndata: {\"jsonrpc\":\"2.0\",\"id\":2,\"result\":{\"tools\":[]}}\n\n";
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let server = tokio::spawn(async move { serve_once(&listener, response).await });

        let transport = transport(addr, None);
        transport
            .send(&json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
            .await
            .unwrap();
        server.await.unwrap();

        let first = transport.receive().await.unwrap().unwrap();
        assert_eq!(first["method"], "notifications/progress");
        let second = transport.receive().await.unwrap().unwrap();
        assert_eq!(second["id"], 2);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response =
            "HTTP/1.1 401 Unauthorized\r\nContent-Length: 6\r\nConnection: close\r\n\r\ndenied"
                .to_string();
        let server = tokio::spawn(async move { serve_once(&listener, response).await });

        let err = transport(addr, None)
            .send(&json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"}))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, TransportError::Http(ref msg) if msg.contains("401")));
    }

    #[tokio::test]
    async fn test_closed_transport_rejects_sends() {
        let transport = transport("127.0.0.1:9".parse().unwrap(), None);
        transport.close().await.unwrap();

        assert!(matches!(
            transport.send(&json!({})).await,
            Err(TransportError::Closed)
        ));
        assert_eq!(transport.receive().await.unwrap(), None);
    }
}
