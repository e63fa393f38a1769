//! # Get Session Use Case
//!
//! セッション照会ユースケース

use std::sync::Arc;

use crate::application::dto::session_summary::SessionSummary;
use crate::application::errors::ServiceError;
use crate::domain::entities::ids::SessionId;
use crate::domain::repositories::session_repository::SessionRepository;

/// セッション照会ユースケース
pub struct GetSessionUseCase<R: SessionRepository> {
    session_repository: Arc<R>,
}

impl<R: SessionRepository> GetSessionUseCase<R> {
    pub fn new(session_repository: Arc<R>) -> Self {
        Self { session_repository }
    }

    /// セッションの要約を返す
    ///
    /// # Errors
    ///
    /// セッションが存在しない場合は `NotFound`
    pub async fn execute(&self, id: SessionId) -> Result<SessionSummary, ServiceError> {
        let session = self.session_repository.find_by_id(id).await?;
        Ok(SessionSummary::from(&session))
    }
}
