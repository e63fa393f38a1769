//! # Session Aggregate
//!
//! 開講セッション（日程・内容・受講登録ポリシー）のドメインエンティティ

use chrono::{DateTime, Utc};

use super::enrollment_policy::EnrollmentPolicy;
use super::ids::{SessionId, UserId};
use crate::domain::errors::EnrollmentError;
use crate::domain::services::enrollment_rules::CapacityRule;

/// 開講期間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDate {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SessionDate {
    /// 開講期間を作成
    ///
    /// # Errors
    ///
    /// 開始が終了より後の場合に `InvalidArgument` を返す
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, EnrollmentError> {
        if start > end {
            return Err(EnrollmentError::invalid_argument(format!(
                "session start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// セッションの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBody {
    pub title: String,
    pub contents: String,
    /// カバー画像（バイナリ）
    pub cover_image: Option<Vec<u8>>,
}

impl SessionBody {
    pub fn new(title: String, contents: String, cover_image: Option<Vec<u8>>) -> Self {
        Self {
            title,
            contents,
            cover_image,
        }
    }
}

/// 開講セッション
///
/// `id` は永続化されるまで `None`。
/// `revision` は読み込み時点のストア上の版で、更新のたびにストア側で進む。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Option<SessionId>,
    date: SessionDate,
    body: SessionBody,
    policy: EnrollmentPolicy,
    revision: u64,
}

impl Session {
    /// 未永続化のセッションを作成
    pub fn new(date: SessionDate, body: SessionBody, policy: EnrollmentPolicy) -> Self {
        Self {
            id: None,
            date,
            body,
            policy,
            revision: 0,
        }
    }

    /// 永続化済みのセッションを復元
    pub fn restore(
        id: SessionId,
        date: SessionDate,
        body: SessionBody,
        policy: EnrollmentPolicy,
    ) -> Self {
        Self {
            id: Some(id),
            date,
            body,
            policy,
            revision: 0,
        }
    }

    /// 読み込み時点の版を設定する
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = revision;
        self
    }

    /// 定員判定ルールを差し替える
    pub fn with_capacity_rule(mut self, rule: CapacityRule) -> Self {
        self.policy = self.policy.with_capacity_rule(rule);
        self
    }

    /// このセッションにユーザーを受講登録する
    ///
    /// # Errors
    ///
    /// - セッションが未永続化の場合は `InvalidArgument`
    /// - それ以外は `EnrollmentPolicy::enroll` のエラー
    pub fn enroll(&mut self, user_id: UserId) -> Result<(), EnrollmentError> {
        let session_id = self.id.ok_or_else(|| {
            EnrollmentError::invalid_argument("session must be saved before enrollment")
        })?;
        self.policy.enroll(session_id, user_id)
    }

    pub fn id(&self) -> Option<SessionId> {
        self.id
    }

    pub fn date(&self) -> &SessionDate {
        &self.date
    }

    pub fn body(&self) -> &SessionBody {
        &self.body
    }

    pub fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 状態遷移用の可変参照
    ///
    /// 名簿は `EnrollmentPolicy` の公開APIからは `enroll` でしか変更できない
    pub fn policy_mut(&mut self) -> &mut EnrollmentPolicy {
        &mut self.policy
    }
}
