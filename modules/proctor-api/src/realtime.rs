//! WebSocket real-time channel.
//!
//! Frames are JSON `{"event": ..., "data": {...}}`. A client joins a
//! session's topic to receive its `warning` and `high_risk` notifications,
//! and may send chat messages that get a scripted reply after a delay.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use proctor_common::Notification;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{chat, AppState};

// --- Frames ---

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinExam {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    LeaveExam {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    ChatMessage {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    Joined {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Left {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    ChatReply {
        message: String,
    },
    Error {
        message: String,
    },
}

// --- Handler ---

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sink, mut stream) = socket.split();
    let (outbound, mut outbound_rx) = mpsc::channel::<String>(state.socket_queue_capacity);

    let writer = tokio::spawn(async move {
        while let Some(text) = outbound_rx.recv().await {
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut conn = Connection::new(state, outbound);
    debug!("Socket connected");

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => conn.handle_text(text.as_str()).await,
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "Socket read failed");
                break;
            }
        }
    }

    conn.close().await;
    writer.abort();
    debug!("Socket disconnected");
}

// --- Connection ---

/// Per-socket state: the bounded outbound queue and one forwarding task per
/// joined session. A client that stops reading loses new frames once the
/// queue is full.
pub struct Connection {
    state: Arc<AppState>,
    outbound: mpsc::Sender<String>,
    subscriptions: HashMap<Uuid, JoinHandle<()>>,
}

impl Connection {
    pub fn new(state: Arc<AppState>, outbound: mpsc::Sender<String>) -> Self {
        Self {
            state,
            outbound,
            subscriptions: HashMap::new(),
        }
    }

    pub fn joined(&self) -> impl Iterator<Item = &Uuid> {
        self.subscriptions.keys()
    }

    pub async fn handle_text(&mut self, text: &str) {
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(ClientMessage::JoinExam { session_id }) => self.join(&session_id),
            Ok(ClientMessage::LeaveExam { session_id }) => self.leave(&session_id).await,
            Ok(ClientMessage::ChatMessage { message }) => self.chat(message),
            Err(e) => {
                warn!(error = %e, "Unreadable socket frame");
                self.send(&ServerMessage::Error {
                    message: format!("Invalid message: {e}"),
                });
            }
        }
    }

    fn join(&mut self, raw_id: &str) {
        let session_id = match Uuid::parse_str(raw_id.trim()) {
            Ok(id) if self.state.engine.sessions().contains(id) => id,
            _ => {
                self.send(&ServerMessage::Error {
                    message: format!("Session not found: {raw_id}"),
                });
                return;
            }
        };

        if !self.subscriptions.contains_key(&session_id) {
            let rx = self.state.hub.subscribe(&session_id.to_string());
            let task = forward(rx, self.outbound.clone(), session_id);
            self.subscriptions.insert(session_id, task);
            info!(session_id = %session_id, "Client joined exam channel");
        }

        self.send(&ServerMessage::Joined {
            session_id: session_id.to_string(),
        });
    }

    async fn leave(&mut self, raw_id: &str) {
        let joined = Uuid::parse_str(raw_id.trim())
            .ok()
            .and_then(|id| self.subscriptions.remove(&id).map(|task| (id, task)));
        let Some((session_id, task)) = joined else {
            self.send(&ServerMessage::Error {
                message: format!("Not joined to session: {raw_id}"),
            });
            return;
        };

        self.unsubscribe(session_id, task).await;
        self.send(&ServerMessage::Left {
            session_id: session_id.to_string(),
        });
    }

    fn chat(&self, message: String) {
        let outbound = self.outbound.clone();
        let delay = self.state.chat_reply_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = ServerMessage::ChatReply {
                message: chat::scripted_reply(&message).to_string(),
            };
            send_frame(&outbound, &reply);
        });
    }

    /// Drop every subscription this socket holds.
    pub async fn close(mut self) {
        for (session_id, task) in std::mem::take(&mut self.subscriptions) {
            self.unsubscribe(session_id, task).await;
        }
    }

    async fn unsubscribe(&self, session_id: Uuid, task: JoinHandle<()>) {
        task.abort();
        // Wait for the receiver to be dropped before pruning the topic.
        let _ = task.await;
        self.state.hub.prune(&session_id.to_string());
        debug!(session_id = %session_id, "Client left exam channel");
    }

    fn send(&self, message: &ServerMessage) {
        send_frame(&self.outbound, message);
    }
}

fn send_frame<T: Serialize>(outbound: &mpsc::Sender<String>, frame: &T) {
    match serde_json::to_string(frame) {
        Ok(text) => match outbound.try_send(text) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                debug!("Socket queue full, frame dropped");
            }
            // Receiver gone means the socket is closing.
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        },
        Err(e) => warn!(error = %e, "Failed to encode socket frame"),
    }
}

fn forward(
    mut rx: broadcast::Receiver<Notification>,
    outbound: mpsc::Sender<String>,
    session_id: Uuid,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notification) => {
                    send_frame(&outbound, &notification);
                    if outbound.is_closed() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(session_id = %session_id, skipped, "Subscriber lagged, notifications dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
