//! Entities.

use std::{fmt, net::SocketAddr, sync::Arc};

use tokio::sync::watch;

use super::{ConnectionId, DeliveryError, MessageSink, Username};

/// A live bidirectional channel to one client.
///
/// Owned by the session that accepted it; the registry only holds
/// shared references.
///
/// Once a delivery to it fails the connection is marked evicted, which ends
/// its session.
pub struct Connection {
    id: ConnectionId,
    username: Username,
    peer_addr: Option<SocketAddr>,
    sink: Arc<dyn MessageSink>,
    evicted: watch::Sender<bool>,
}

impl Connection {
    pub fn new(
        username: Username,
        peer_addr: Option<SocketAddr>,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            id: ConnectionId::generate(),
            username,
            peer_addr,
            sink,
            evicted: watch::Sender::new(false),
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    /// Deliver one serialized payload to the client.
    pub async fn send_text(&self, payload: &str) -> Result<(), DeliveryError> {
        self.sink.send_text(payload).await
    }

    /// Mark the connection dead after a failed delivery. Idempotent.
    pub fn mark_evicted(&self) {
        self.evicted.send_replace(true);
    }

    pub fn is_evicted(&self) -> bool {
        *self.evicted.borrow()
    }

    /// Resolves once the connection has been marked evicted.
    pub async fn evicted(&self) {
        let mut evicted = self.evicted.subscribe();
        // the sender lives as long as `self`, so this cannot fail
        let _ = evicted.wait_for(|evicted| *evicted).await;
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("peer_addr", &self.peer_addr)
            .field("evicted", &self.is_evicted())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}
