//! # Session Summary DTO
//!
//! セッション照会の出力

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::ids::{SessionId, UserId};
use crate::domain::entities::session::Session;
use crate::domain::entities::status::{ProgressStatus, RecruitingStatus};

/// セッションの要約
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub id: Option<SessionId>,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub capacity: u32,
    pub recruiting_status: RecruitingStatus,
    pub progress_status: ProgressStatus,
    /// 登録済みユーザー（昇順）
    pub enrolled_users: Vec<UserId>,
}

impl SessionSummary {
    /// 残り定員（超過している場合は0）
    pub fn seats_left(&self) -> usize {
        (self.capacity as usize).saturating_sub(self.enrolled_users.len())
    }
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        let policy = session.policy();
        Self {
            id: session.id(),
            title: session.body().title.clone(),
            start: session.date().start(),
            end: session.date().end(),
            capacity: policy.capacity(),
            recruiting_status: policy.recruiting_status(),
            progress_status: policy.progress_status(),
            enrolled_users: policy.roster().user_ids(),
        }
    }
}
