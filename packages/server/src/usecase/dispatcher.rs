//! ブロードキャスト配信
//!
//! ## 責務
//!
//! - 1 つのメッセージをレジストリの全接続へ配信する（`broadcast`）
//! - 1 つの接続だけへ配信する（`send_to`）
//! - 配信に失敗した接続をレジストリから取り除く
//!
//! ## 配信ルール
//!
//! - 配信対象は呼び出し時点のスナップショット。走査中の削除は次回以降の配信にだけ影響する
//! - 配信順はスナップショットの順序（= 接続順）
//! - 失敗はリトライしない。失敗した接続は死んでいるとみなして削除し、残りへの配信を続ける
//! - 削除した接続には退去マークを付け、そのセッションを終了させる
//! - 失敗は呼び出し元に伝播しない（ログにのみ残す）

use std::sync::Arc;

use crate::{
    domain::{ChatEvent, Connection, ConnectionId, ConnectionRegistry, DeliveryError, Username},
    infrastructure::dto::conversion::encode_event,
};

/// 1 回のブロードキャストの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 配信に成功した接続（配信順）
    pub delivered: Vec<ConnectionId>,
    /// 配信に失敗してレジストリから削除した接続
    pub evicted: Vec<ConnectionId>,
}

/// ブロードキャスト配信
pub struct BroadcastDispatcher {
    registry: Arc<dyn ConnectionRegistry>,
}

impl BroadcastDispatcher {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// レジストリの全接続へ配信
    pub async fn broadcast(&self, event: &ChatEvent) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        let Some(payload) = encode(event) else {
            return report;
        };

        let targets = self.registry.snapshot().await;
        for connection in targets {
            match connection.send_text(&payload).await {
                Ok(()) => {
                    tracing::debug!("Broadcasted message to '{}'", connection.username());
                    report.delivered.push(connection.id());
                }
                Err(e) => {
                    self.evict(&connection, &e).await;
                    report.evicted.push(connection.id());
                }
            }
        }

        report
    }

    /// 1 つの接続だけへ配信（配信できた場合は `true`）
    pub async fn send_to(&self, connection: &Connection, event: &ChatEvent) -> bool {
        let Some(payload) = encode(event) else {
            return false;
        };

        match connection.send_text(&payload).await {
            Ok(()) => {
                tracing::debug!("Sent personal message to '{}'", connection.username());
                true
            }
            Err(e) => {
                self.evict(connection, &e).await;
                false
            }
        }
    }

    /// system メッセージを全接続へ配信
    pub async fn broadcast_system(&self, text: impl Into<String>) -> BroadcastReport {
        self.broadcast(&ChatEvent::system(text)).await
    }

    /// chat メッセージを全接続へ配信
    pub async fn broadcast_chat(
        &self,
        username: &Username,
        text: impl Into<String>,
    ) -> BroadcastReport {
        self.broadcast(&ChatEvent::chat(username.clone(), text)).await
    }

    async fn evict(&self, connection: &Connection, error: &DeliveryError) {
        tracing::warn!(
            connection_id = %connection.id(),
            "Failed to deliver message to '{}', disconnecting: {}",
            connection.username(),
            error
        );
        connection.mark_evicted();
        self.registry.remove(&connection.id()).await;
    }
}

fn encode(event: &ChatEvent) -> Option<String> {
    match encode_event(event) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::error!("Failed to serialize outbound message: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::sink::MockMessageSink,
        infrastructure::registry::InMemoryConnectionRegistry,
        usecase::test_support::{Journal, RecordingSink, chat, recording_connection, system},
    };

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - broadcast: スナップショット順に全接続へ配信される
    // - broadcast: 1 接続の失敗はその接続だけを削除し、他への配信は続く
    // - broadcast: 走査中に削除された接続にも配信される（呼び出し時点の集合が対象）
    // - send_to: 失敗は呼び出し元に伝播せず、接続が削除される
    //
    // 【なぜこのテストが必要か】
    // - 1 つの壊れた接続が他のクライアントへの配信を止めてはならない
    // ========================================

    fn create_test_dispatcher() -> (BroadcastDispatcher, Arc<InMemoryConnectionRegistry>) {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        (BroadcastDispatcher::new(registry.clone()), registry)
    }

    /// 送信のたびに指定した接続をレジストリから削除する Sink
    struct RemovingSink {
        registry: Arc<InMemoryConnectionRegistry>,
        target: ConnectionId,
    }

    #[async_trait::async_trait]
    impl crate::domain::MessageSink for RemovingSink {
        async fn send_text(&self, _payload: &str) -> Result<(), DeliveryError> {
            self.registry.remove(&self.target).await;
            Ok(())
        }
    }

    fn failing_mock(times: usize) -> MockMessageSink {
        let mut sink = MockMessageSink::new();
        sink.expect_send_text()
            .times(times)
            .returning(|_| Err(DeliveryError::Transport("connection reset".to_string())));
        sink
    }

    #[tokio::test]
    async fn test_broadcast_delivers_in_registry_order() {
        // テスト項目: 接続順に全接続へ同じメッセージが配信される
        // given (前提条件):
        let (dispatcher, registry) = create_test_dispatcher();
        let journal: Journal = Default::default();
        for name in ["charlie", "alice", "bob"] {
            let sink = Arc::new(RecordingSink::with_journal(name, journal.clone()));
            registry
                .add(Arc::new(Connection::new(name.into(), None, sink)))
                .await;
        }

        // when (操作):
        let report = dispatcher.broadcast_system("hello everyone").await;

        // then (期待する結果):
        assert_eq!(report.delivered.len(), 3);
        assert!(report.evicted.is_empty());
        let journal = journal.lock().unwrap();
        let order: Vec<&str> = journal.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(order, vec!["charlie", "alice", "bob"]);
        assert!(
            journal
                .iter()
                .all(|(_, payload)| payload == r#"{"type":"system","message":"hello everyone"}"#)
        );
    }

    #[tokio::test]
    async fn test_broadcast_single_failure_removes_only_failing_connection() {
        // テスト項目: 途中の 1 接続が失敗しても、その接続だけが削除され残りには配信される
        // given (前提条件):
        let (dispatcher, registry) = create_test_dispatcher();
        let (alice, alice_sink) = recording_connection("alice");
        let bob = Arc::new(Connection::new("bob".into(), None, Arc::new(failing_mock(1))));
        let (charlie, charlie_sink) = recording_connection("charlie");
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;
        registry.add(charlie.clone()).await;

        // when (操作):
        let report = dispatcher.broadcast_chat(&"alice".into(), "hello").await;

        // then (期待する結果):
        assert_eq!(report.delivered, vec![alice.id(), charlie.id()]);
        assert_eq!(report.evicted, vec![bob.id()]);
        assert_eq!(alice_sink.received(), vec![chat("alice", "hello")]);
        assert_eq!(charlie_sink.received(), vec![chat("alice", "hello")]);

        let remaining: Vec<ConnectionId> =
            registry.snapshot().await.iter().map(|c| c.id()).collect();
        assert_eq!(remaining, vec![alice.id(), charlie.id()]);
        assert!(bob.is_evicted());
        assert!(!alice.is_evicted());
        assert!(!charlie.is_evicted());
    }

    #[tokio::test]
    async fn test_evicted_connection_is_skipped_by_next_broadcast() {
        // テスト項目: 削除された接続には次回以降のブロードキャストが届かない
        // given (前提条件):
        let (dispatcher, registry) = create_test_dispatcher();
        let (alice, alice_sink) = recording_connection("alice");
        // 1 回目で失敗、2 回目は呼ばれないことを times(1) で検証
        let bob = Arc::new(Connection::new("bob".into(), None, Arc::new(failing_mock(1))));
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;

        // when (操作):
        dispatcher.broadcast_system("first").await;
        let second = dispatcher.broadcast_system("second").await;

        // then (期待する結果):
        assert_eq!(second.delivered, vec![alice.id()]);
        assert!(second.evicted.is_empty());
        assert_eq!(alice_sink.received(), vec![system("first"), system("second")]);
    }

    #[tokio::test]
    async fn test_broadcast_targets_membership_at_call_start() {
        // テスト項目: 走査中に別の接続が削除されても、呼び出し時点の全接続に配信される
        // given (前提条件):
        let (dispatcher, registry) = create_test_dispatcher();
        let (bob, bob_sink) = recording_connection("bob");
        let bob_id = bob.id();

        // alice への送信中に bob がレジストリから外れる（並行した切断を模擬）
        let alice = Arc::new(Connection::new(
            "alice".into(),
            None,
            Arc::new(RemovingSink {
                registry: registry.clone(),
                target: bob_id,
            }),
        ));
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;

        // when (操作):
        let report = dispatcher.broadcast_system("snapshot").await;

        // then (期待する結果):
        assert_eq!(report.delivered, vec![alice.id(), bob.id()]);
        assert_eq!(bob_sink.received(), vec![system("snapshot")]);
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_broadcast_to_empty_registry() {
        // テスト項目: 接続が 1 つもなくてもエラーにならない
        // given (前提条件):
        let (dispatcher, _registry) = create_test_dispatcher();

        // when (操作):
        let report = dispatcher.broadcast_system("nobody here").await;

        // then (期待する結果):
        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn test_send_to_delivers_only_to_target() {
        // テスト項目: send_to は指定した接続にだけ配信する
        // given (前提条件):
        let (dispatcher, registry) = create_test_dispatcher();
        let (alice, alice_sink) = recording_connection("alice");
        let (bob, bob_sink) = recording_connection("bob");
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;

        // when (操作):
        let delivered = dispatcher.send_to(&alice, &ChatEvent::welcome()).await;

        // then (期待する結果):
        assert!(delivered);
        assert_eq!(alice_sink.received(), vec![system("Welcome to the chat!")]);
        assert!(bob_sink.received().is_empty());
    }

    #[tokio::test]
    async fn test_send_to_failure_is_swallowed_and_evicts() {
        // テスト項目: send_to の失敗は伝播せず、接続がレジストリから削除される
        // given (前提条件):
        let (dispatcher, registry) = create_test_dispatcher();
        let mut sink = MockMessageSink::new();
        sink.expect_send_text()
            .withf(|payload| payload.contains("Welcome to the chat!"))
            .times(1)
            .returning(|_| Err(DeliveryError::Closed));
        let alice = Arc::new(Connection::new("alice".into(), None, Arc::new(sink)));
        registry.add(alice.clone()).await;

        // when (操作):
        let delivered = dispatcher.send_to(&alice, &ChatEvent::welcome()).await;

        // then (期待する結果):
        assert!(!delivered);
        assert_eq!(registry.count().await, 0);
        assert!(alice.is_evicted());
    }
}
