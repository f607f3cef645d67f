//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - レジストリへの登録、参加通知のブロードキャスト、本人へのウェルカムメッセージ
//!
//! ### なぜこのテストが必要か
//! - 参加通知は本人を含む全接続に届き、ウェルカムは本人にだけ届く必要がある
//! - ウェルカムの送信失敗が接続処理を止めないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存の参加者がいる状態での接続
//! - エッジケース：同名ユーザーの接続（重複チェックはしない）
//! - 異常系：新規接続への送信失敗

use std::sync::Arc;

use crate::domain::{ChatEvent, Connection, ConnectionRegistry};

use super::dispatcher::{BroadcastDispatcher, BroadcastReport};

/// 接続処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOutcome {
    /// 参加通知の配信結果
    pub announced: BroadcastReport,
    /// ウェルカムメッセージが届いたか
    pub welcomed: bool,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    dispatcher: Arc<BroadcastDispatcher>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        dispatcher: Arc<BroadcastDispatcher>,
    ) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }

    /// 参加者接続を実行
    ///
    /// 1. レジストリに登録
    /// 2. `"<username> has joined the chat."` を全接続（本人を含む）にブロードキャスト
    /// 3. `"Welcome to the chat!"` を本人にだけ送信
    ///
    /// 送信の失敗はここでは伝播しない。失敗した接続はレジストリから外れている。
    pub async fn execute(&self, connection: Arc<Connection>) -> ConnectOutcome {
        self.registry.add(connection.clone()).await;

        let announced = self
            .dispatcher
            .broadcast(&ChatEvent::joined(connection.username()))
            .await;

        let welcomed = self
            .dispatcher
            .send_to(&connection, &ChatEvent::welcome())
            .await;

        ConnectOutcome {
            announced,
            welcomed,
        }
    }
}
