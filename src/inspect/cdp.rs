//! DevTools protocol session
//!
//! A minimal client for the browser's DevTools WebSocket protocol, scoped
//! to what validation needs: attach to a page target, issue the two
//! `Security` domain commands, detach. Commands are matched to replies by
//! id; event notifications arriving in between are skipped.

use futures::{SinkExt, StreamExt};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::common::{Result, SentryError};
use crate::security::SecuritySnapshot;

/// Outgoing command envelope
#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
    id: u64,
    method: &'a str,
    params: Value,
}

/// Incoming message envelope; replies carry an id, events carry a method
#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<WireError>,
    #[serde(default)]
    method: Option<String>,
}

/// Protocol-level command failure
#[derive(Debug, Deserialize)]
struct WireError {
    code: i64,
    message: String,
}

/// One attached DevTools session
pub struct CdpSession {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    next_id: u64,
}

impl CdpSession {
    /// Attach to a page target's debugger WebSocket
    pub async fn attach(ws_url: &str) -> Result<Self> {
        debug!("Attaching DevTools session to {}", ws_url);
        let (ws, _response) = connect_async(ws_url).await?;

        Ok(Self { ws, next_id: 0 })
    }

    /// Send one command and wait for its reply
    ///
    /// Event notifications and stale replies received while waiting are
    /// discarded; the session carries no subscriptions.
    pub async fn command(&mut self, method: &str, params: Value) -> Result<Value> {
        self.next_id += 1;
        let id = self.next_id;

        let request = serde_json::to_string(&CommandRequest { id, method, params })?;
        trace!("-> {}", request);
        self.ws.send(Message::Text(request)).await?;

        while let Some(message) = self.ws.next().await {
            let text = match message? {
                Message::Text(text) => text,
                Message::Close(_) => {
                    return Err(SentryError::Inspect(format!(
                        "session closed while waiting for {} reply",
                        method
                    )));
                }
                // Pings are answered by the transport; everything else is noise
                _ => continue,
            };

            let reply: WireMessage = serde_json::from_str(&text)?;

            if let Some(event) = &reply.method {
                trace!("<- event {} (ignored)", event);
                continue;
            }

            if reply.id != Some(id) {
                continue;
            }

            if let Some(error) = reply.error {
                return Err(SentryError::Inspect(format!(
                    "{} failed: {} (code {})",
                    method, error.message, error.code
                )));
            }

            return Ok(reply.result.unwrap_or(Value::Null));
        }

        Err(SentryError::Inspect(format!(
            "connection closed before {} reply",
            method
        )))
    }

    /// Fetch the page's security snapshot
    ///
    /// Enables the `Security` domain and reads the current state in one
    /// round trip each, mirroring the single-shot fetch contract: no
    /// subscription to state-change events is left behind.
    pub async fn fetch_security_state(&mut self) -> Result<SecuritySnapshot> {
        self.command("Security.enable", Value::Object(Default::default()))
            .await?;

        let result = self
            .command("Security.getSecurityState", Value::Object(Default::default()))
            .await?;

        let snapshot = serde_json::from_value(result)?;
        Ok(snapshot)
    }

    /// Detach from the target
    pub async fn detach(mut self) -> Result<()> {
        debug!("Detaching DevTools session");
        self.ws.close(None).await?;
        Ok(())
    }
}
