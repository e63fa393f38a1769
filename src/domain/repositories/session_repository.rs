//! # Session Repository Trait
//!
//! セッション集約の永続化を抽象化

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::ids::SessionId;
use crate::domain::entities::session::Session;
use crate::domain::errors::RepositoryError;

/// セッションリポジトリ
///
/// 同一セッションへの更新の直列化は呼び出し側の責務。
/// 実装は `update` 内で定員チェック済みの名簿追加を原子的に書き込むこと。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 新しいセッションを保存し、採番したIDを返す
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合に `StorageFailure` を返す
    async fn save(&self, session: &Session) -> Result<SessionId, RepositoryError>;

    /// IDでセッションを復元する
    ///
    /// 名簿が空の場合は空の `Roster` を持つ
    ///
    /// # Errors
    ///
    /// - 存在しない場合は `NotFound`
    /// - 読み込み・復元に失敗した場合は `StorageFailure`
    async fn find_by_id(&self, id: SessionId) -> Result<Session, RepositoryError>;

    /// セッションの変更を保存する
    ///
    /// 日程・内容・定員・状態を書き換え、IDが未割り当ての名簿レコードだけを追加する。
    /// 既存の名簿レコードは書き換えない。
    ///
    /// # Errors
    ///
    /// - IDがない、または存在しない場合は `NotFound` / `StorageFailure`
    /// - 書き込みに失敗した場合は `StorageFailure`
    async fn update(&self, session: &Session) -> Result<(), RepositoryError>;
}
