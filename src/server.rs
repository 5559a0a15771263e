use std::path::Path;
use std::sync::Arc;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;
use warp::ws::{Message, WebSocket};
use warp::Filter;

use crate::config::RelayConfig;
use crate::messages::{ClientEvent, ServerEvent};
use crate::registry::ConnectionId;
use crate::relay::Relay;

#[derive(Clone)]
pub struct Server {
    relay: Arc<Mutex<Relay>>,
}

impl Server {
    pub fn new(config: RelayConfig) -> Self {
        Self::from_relay(Relay::new(config))
    }

    pub fn from_relay(relay: Relay) -> Self {
        Server {
            relay: Arc::new(Mutex::new(relay)),
        }
    }

    pub async fn handle_connection(&self, ws: WebSocket) {
        let connection_id = Uuid::new_v4();
        let (mut ws_tx, mut ws_rx) = ws.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Failed to encode {:?}: {}", event, e);
                        continue;
                    }
                };
                if let Err(e) = ws_tx.send(Message::text(text)).await {
                    debug!("Failed to send WebSocket message: {}", e);
                    break;
                }
            }
        });

        self.relay.lock().await.connect(connection_id, tx);
        info!("New connection: {}", connection_id);

        while let Some(result) = ws_rx.next().await {
            match result {
                Ok(msg) => {
                    if msg.is_close() {
                        break;
                    }
                    if let Ok(text) = msg.to_str() {
                        self.handle_text(connection_id, text).await;
                    }
                }
                Err(e) => {
                    warn!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
            }
        }

        // Dropping the session's sender ends the writer task.
        self.relay.lock().await.disconnect(connection_id);
    }

    async fn handle_text(&self, connection_id: ConnectionId, text: &str) {
        let event = match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => event,
            Err(e) => {
                warn!("Ignoring malformed event from {}: {}", connection_id, e);
                return;
            }
        };

        let mut relay = self.relay.lock().await;
        if let Err(e) = relay.dispatch(connection_id, event) {
            warn!("Event from {} not applied: {}", connection_id, e);
        }
    }
}

/// Websocket endpoint at `/ws` plus the landing page and client assets under `public_dir`.
pub fn routes(
    server: Server,
    public_dir: &Path,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let ws_route = warp::path("ws")
        .and(warp::path::end())
        .and(warp::ws())
        .map(move |ws: warp::ws::Ws| {
            let server = server.clone();
            ws.on_upgrade(move |socket| async move {
                server.handle_connection(socket).await;
            })
        });

    let index = warp::path::end().and(warp::fs::file(public_dir.join("index.html")));
    let static_files = warp::path("static").and(warp::fs::dir(public_dir.join("static")));
    let scripts = warp::path("js").and(warp::fs::dir(public_dir.join("js")));

    ws_route
        .or(index)
        .or(static_files)
        .or(scripts)
        .with(warp::cors().allow_any_origin())
}
