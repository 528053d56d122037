use std::sync::Arc;
use std::time::Duration;

use proctor_common::Config;
use proctor_engine::{BroadcastNotifier, ProctorEngine};

pub mod chat;
pub mod error;
pub mod realtime;
pub mod rest;
pub mod routes;

pub use routes::build_router;

pub struct AppState {
    pub engine: ProctorEngine<Arc<BroadcastNotifier>>,
    pub hub: Arc<BroadcastNotifier>,
    pub chat_reply_delay: Duration,
    /// Frames buffered per socket before new ones are dropped.
    pub socket_queue_capacity: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let hub = Arc::new(BroadcastNotifier::new(config.notify_channel_capacity));
        Self {
            engine: ProctorEngine::new(hub.clone()),
            hub,
            chat_reply_delay: config.chat_reply_delay,
            socket_queue_capacity: config.notify_channel_capacity.max(1),
        }
    }
}
