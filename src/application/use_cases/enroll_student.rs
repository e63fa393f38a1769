//! # Enroll Student Use Case
//!
//! 受講登録ユースケース

use log::{info, warn};
use std::sync::Arc;

use crate::application::dto::session_summary::SessionSummary;
use crate::application::errors::ServiceError;
use crate::application::locks::SessionLocks;
use crate::domain::entities::ids::{SessionId, UserId};
use crate::domain::repositories::session_repository::SessionRepository;
use crate::domain::services::enrollment_rules::CapacityRule;

/// 受講登録ユースケース
///
/// 読み込み -> 登録 -> 保存 をセッション単位のロック内で行う。
/// 失敗した場合は何も保存しない。
pub struct EnrollStudentUseCase<R: SessionRepository> {
    session_repository: Arc<R>,
    locks: Arc<SessionLocks>,
    capacity_rule: CapacityRule,
}

impl<R: SessionRepository> EnrollStudentUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `session_repository` - セッションリポジトリ
    /// * `locks` - セッションロック
    /// * `capacity_rule` - 定員判定のルール
    pub fn new(
        session_repository: Arc<R>,
        locks: Arc<SessionLocks>,
        capacity_rule: CapacityRule,
    ) -> Self {
        Self {
            session_repository,
            locks,
            capacity_rule,
        }
    }

    /// ユーザーをセッションに受講登録する
    ///
    /// # Returns
    ///
    /// 登録後のセッションの要約
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded` / `DuplicateEnrollment` / `NotRecruiting`
    ///   （保存時に別プロセスの登録と衝突した場合も同じ種別）
    /// - 読み込み後に別の書き込みで状態が変わっていた場合は `StaleSession`
    /// - セッションが存在しない場合は `NotFound`
    /// - 読み書きに失敗した場合は `StorageFailure`
    pub async fn execute(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<SessionSummary, ServiceError> {
        let _guard = self.locks.acquire(session_id).await;

        let mut session = self
            .session_repository
            .find_by_id(session_id)
            .await?
            .with_capacity_rule(self.capacity_rule);

        if let Err(e) = session.enroll(user_id) {
            warn!(
                "Enrollment of user {} into session {} rejected: {}",
                user_id, session_id, e
            );
            return Err(e.into());
        }

        self.session_repository.update(&session).await?;

        info!(
            "Enrolled user {} into session {} ({}/{})",
            user_id,
            session_id,
            session.policy().roster().size(),
            session.policy().capacity()
        );

        Ok(SessionSummary::from(&session))
    }
}
