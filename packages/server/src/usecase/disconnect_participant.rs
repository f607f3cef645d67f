//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - レジストリからの削除と退出通知のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 切断した本人には退出通知が届かず、残りの参加者にだけ届くことを保証
//! - 配信失敗で既に外された接続の切断処理も失敗しないこと（冪等性）
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断と通知
//! - エッジケース：最後の参加者の切断（通知対象なし）
//! - エッジケース：既にレジストリから外れている接続の切断

use std::sync::Arc;

use crate::domain::{ChatEvent, Connection, ConnectionRegistry};

use super::dispatcher::{BroadcastDispatcher, BroadcastReport};

/// 切断処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    /// この呼び出しでレジストリから削除したか（既に外れていた場合は `false`）
    pub removed: bool,
    /// 退出通知の配信結果
    pub announced: BroadcastReport,
}

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    dispatcher: Arc<BroadcastDispatcher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        dispatcher: Arc<BroadcastDispatcher>,
    ) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// 参加者切断を実行
    ///
    /// 1. レジストリから削除（存在しなければ何もしない）
    /// 2. `"<username> has left the chat."` を残りの全接続にブロードキャスト
    pub async fn execute(&self, connection: &Connection) -> DisconnectOutcome {
        let removed = self.registry.remove(&connection.id()).await;

        let announced = self
            .dispatcher
            .broadcast(&ChatEvent::left(connection.username()))
            .await;

        DisconnectOutcome { removed, announced }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::registry::InMemoryConnectionRegistry,
        usecase::test_support::{recording_connection, system},
    };

    fn create_test_usecase() -> (DisconnectParticipantUseCase, Arc<InMemoryConnectionRegistry>) {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let dispatcher = Arc::new(BroadcastDispatcher::new(registry.clone()));
        (
            DisconnectParticipantUseCase::new(registry.clone(), dispatcher),
            registry,
        )
    }

    #[tokio::test]
    async fn test_disconnect_notifies_remaining_participants() {
        // テスト項目: 切断すると残りの参加者にだけ退出通知が届く
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (alice, alice_sink) = recording_connection("alice");
        let (bob, bob_sink) = recording_connection("bob");
        let (charlie, charlie_sink) = recording_connection("charlie");
        registry.add(alice.clone()).await;
        registry.add(bob.clone()).await;
        registry.add(charlie.clone()).await;

        // when (操作):
        let outcome = usecase.execute(&alice).await;

        // then (期待する結果):
        assert!(outcome.removed);
        assert_eq!(outcome.announced.delivered, vec![bob.id(), charlie.id()]);
        assert!(alice_sink.received().is_empty());
        assert_eq!(bob_sink.received(), vec![system("alice has left the chat.")]);
        assert_eq!(
            charlie_sink.received(),
            vec![system("alice has left the chat.")]
        );
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn test_disconnect_last_participant() {
        // テスト項目: 最後の参加者が切断した場合、通知対象は空
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (alice, _alice_sink) = recording_connection("alice");
        registry.add(alice.clone()).await;

        // when (操作):
        let outcome = usecase.execute(&alice).await;

        // then (期待する結果):
        assert!(outcome.removed);
        assert!(outcome.announced.delivered.is_empty());
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_already_removed_connection() {
        // テスト項目: 既に外れている接続の切断もエラーにならず、通知は送られる
        // given (前提条件):
        let (usecase, registry) = create_test_usecase();
        let (alice, _alice_sink) = recording_connection("alice");
        let (bob, bob_sink) = recording_connection("bob");
        registry.add(bob.clone()).await;

        // when (操作):
        let outcome = usecase.execute(&alice).await;

        // then (期待する結果):
        assert!(!outcome.removed);
        assert_eq!(bob_sink.received(), vec![system("alice has left the chat.")]);
        assert_eq!(registry.count().await, 1);
    }
}
