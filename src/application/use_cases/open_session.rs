//! # Open Session Use Case
//!
//! セッション開設ユースケース

use log::info;
use std::sync::Arc;

use crate::application::dto::open_session_input::OpenSessionInput;
use crate::application::errors::ServiceError;
use crate::domain::entities::enrollment_policy::EnrollmentPolicy;
use crate::domain::entities::ids::SessionId;
use crate::domain::entities::session::{Session, SessionBody, SessionDate};
use crate::domain::repositories::session_repository::SessionRepository;

/// セッション開設ユースケース
///
/// 入力を検証してセッションを組み立て、保存する
pub struct OpenSessionUseCase<R: SessionRepository> {
    session_repository: Arc<R>,
}

impl<R: SessionRepository> OpenSessionUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `session_repository` - セッションリポジトリ
    pub fn new(session_repository: Arc<R>) -> Self {
        Self { session_repository }
    }

    /// セッションを開設する
    ///
    /// # Returns
    ///
    /// 採番されたセッションID
    ///
    /// # Errors
    ///
    /// - 定員が0以下、または開始が終了より後の場合は `InvalidArgument`
    /// - 保存に失敗した場合はリポジトリのエラー
    pub async fn execute(&self, input: OpenSessionInput) -> Result<SessionId, ServiceError> {
        let date = SessionDate::new(input.start, input.end)?;
        let body = SessionBody::new(input.title, input.contents, input.cover_image);
        let policy = EnrollmentPolicy::new(input.capacity)?;

        let session = Session::new(date, body, policy);
        let id = self.session_repository.save(&session).await?;

        info!(
            "Opened session {} ({}) with capacity {}",
            id,
            session.body().title,
            session.policy().capacity()
        );

        Ok(id)
    }
}
