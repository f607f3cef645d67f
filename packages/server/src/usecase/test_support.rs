//! Test doubles shared by the use case tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;

use crate::{
    domain::{Connection, DeliveryError, MessageSink, Username},
    infrastructure::dto::websocket::ServerMessage,
};

/// Shared record of which sink received which payload, in delivery order
pub type Journal = Arc<Mutex<Vec<(String, String)>>>;

/// Sink that records every payload and can be switched to failing
pub struct RecordingSink {
    label: String,
    frames: Mutex<Vec<String>>,
    failing: AtomicBool,
    journal: Option<Journal>,
}

impl RecordingSink {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            frames: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            journal: None,
        }
    }

    pub fn with_journal(label: &str, journal: Journal) -> Self {
        Self {
            journal: Some(journal),
            ..Self::new(label)
        }
    }

    pub fn fail_from_now_on(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Received payloads parsed back into wire messages
    pub fn received(&self) -> Vec<ServerMessage> {
        self.frames
            .lock()
            .unwrap()
            .iter()
            .map(|frame| serde_json::from_str(frame).unwrap())
            .collect()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send_text(&self, payload: &str) -> Result<(), DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Transport("broken pipe".to_string()));
        }
        self.frames.lock().unwrap().push(payload.to_string());
        if let Some(journal) = &self.journal {
            journal
                .lock()
                .unwrap()
                .push((self.label.clone(), payload.to_string()));
        }
        Ok(())
    }
}

/// Build a connection backed by a fresh recording sink
pub fn recording_connection(username: &str) -> (Arc<Connection>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new(username));
    let connection = Arc::new(Connection::new(
        Username::from(username),
        None,
        sink.clone(),
    ));
    (connection, sink)
}

pub fn system(message: &str) -> ServerMessage {
    ServerMessage::System {
        message: message.to_string(),
    }
}

pub fn chat(username: &str, message: &str) -> ServerMessage {
    ServerMessage::Chat {
        username: username.to_string(),
        message: message.to_string(),
    }
}
