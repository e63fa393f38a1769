//! # Change Status Use Case
//!
//! 募集状態・進行状態の変更ユースケース

use log::info;
use std::sync::Arc;

use crate::application::dto::session_summary::SessionSummary;
use crate::application::errors::ServiceError;
use crate::application::locks::SessionLocks;
use crate::domain::entities::enrollment_policy::EnrollmentPolicy;
use crate::domain::entities::ids::SessionId;
use crate::domain::repositories::session_repository::SessionRepository;

/// 状態遷移の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    StartRecruiting,
    EndRecruiting,
    StartProgress,
    EndProgress,
}

impl StatusTransition {
    fn apply(self, policy: &mut EnrollmentPolicy) {
        match self {
            StatusTransition::StartRecruiting => policy.start_recruiting(),
            StatusTransition::EndRecruiting => policy.end_recruiting(),
            StatusTransition::StartProgress => policy.start_progress(),
            StatusTransition::EndProgress => policy.end_progress(),
        }
    }
}

/// 状態変更ユースケース
pub struct ChangeStatusUseCase<R: SessionRepository> {
    session_repository: Arc<R>,
    locks: Arc<SessionLocks>,
}

impl<R: SessionRepository> ChangeStatusUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `session_repository` - セッションリポジトリ
    /// * `locks` - 受講登録と共有するセッションロック
    pub fn new(session_repository: Arc<R>, locks: Arc<SessionLocks>) -> Self {
        Self {
            session_repository,
            locks,
        }
    }

    /// セッションの状態を変更して保存する
    ///
    /// # Errors
    ///
    /// 読み込みまたは保存に失敗した場合にリポジトリのエラーを返す
    pub async fn execute(
        &self,
        id: SessionId,
        transition: StatusTransition,
    ) -> Result<SessionSummary, ServiceError> {
        let _guard = self.locks.acquire(id).await;

        let mut session = self.session_repository.find_by_id(id).await?;
        transition.apply(session.policy_mut());
        self.session_repository.update(&session).await?;

        info!(
            "Session {} status: recruiting={}, progress={}",
            id,
            session.policy().recruiting_status(),
            session.policy().progress_status()
        );

        Ok(SessionSummary::from(&session))
    }
}
