//! # EnrollmentPolicy Entity
//!
//! 定員・募集状態・受講者名簿をまとめた集約
//!
//! 受講登録（`enroll`）が唯一の名簿変更操作で、全ての検証を追加より前に行う。

use super::ids::{SessionId, UserId};
use super::roster::Roster;
use super::status::{ProgressStatus, RecruitingStatus};
use crate::domain::errors::EnrollmentError;
use crate::domain::services::enrollment_rules::{can_enroll, has_free_seat, CapacityRule};

/// 受講登録ポリシー
///
/// 定員は生成後に変更できない。
/// 等価性は永続化される状態（定員・状態・名簿）だけで判定し、
/// 設定から与える `capacity_rule` は含めない。
#[derive(Debug, Clone)]
pub struct EnrollmentPolicy {
    capacity: u32,
    recruiting_status: RecruitingStatus,
    progress_status: ProgressStatus,
    roster: Roster,
    capacity_rule: CapacityRule,
}

impl EnrollmentPolicy {
    /// 新しいポリシーを作成
    ///
    /// 募集状態は `Ready`、名簿は空で始まる
    ///
    /// # Arguments
    ///
    /// * `capacity` - 定員（1以上）
    ///
    /// # Errors
    ///
    /// 定員が0以下の場合に `InvalidArgument` を返す
    pub fn new(capacity: i64) -> Result<Self, EnrollmentError> {
        Self::restore(
            capacity,
            RecruitingStatus::Ready,
            ProgressStatus::Preparing,
            Roster::new(),
        )
    }

    /// 永続化された状態からポリシーを復元
    ///
    /// # Errors
    ///
    /// 定員が0以下の場合に `InvalidArgument` を返す
    pub fn restore(
        capacity: i64,
        recruiting_status: RecruitingStatus,
        progress_status: ProgressStatus,
        roster: Roster,
    ) -> Result<Self, EnrollmentError> {
        let capacity = validate_capacity(capacity)?;

        Ok(Self {
            capacity,
            recruiting_status,
            progress_status,
            roster,
            capacity_rule: CapacityRule::default(),
        })
    }

    /// 定員判定ルールを差し替える
    pub fn with_capacity_rule(mut self, rule: CapacityRule) -> Self {
        self.capacity_rule = rule;
        self
    }

    /// 募集を開始する
    ///
    /// 遷移元の状態は問わない（`End` からの再開も許す）
    pub fn start_recruiting(&mut self) {
        self.recruiting_status = RecruitingStatus::Recruiting;
    }

    /// 募集を終了する
    pub fn end_recruiting(&mut self) {
        self.recruiting_status = RecruitingStatus::End;
    }

    pub fn start_progress(&mut self) {
        self.progress_status = ProgressStatus::InProgress;
    }

    pub fn end_progress(&mut self) {
        self.progress_status = ProgressStatus::Finished;
    }

    /// ユーザーを受講登録する
    ///
    /// 検証順序は呼び出し元が受け取るエラーに影響するため固定:
    /// 1. 定員
    /// 2. 重複
    /// 3. 募集状態
    ///
    /// # Errors
    ///
    /// - `CapacityExceeded`: 空席がない
    /// - `DuplicateEnrollment`: 登録済み
    /// - `NotRecruiting`: 募集中ではない
    pub fn enroll(&mut self, session_id: SessionId, user_id: UserId) -> Result<(), EnrollmentError> {
        if !has_free_seat(self.capacity_rule, self.roster.size(), self.capacity) {
            return Err(EnrollmentError::CapacityExceeded {
                capacity: self.capacity,
                enrolled: self.roster.size(),
            });
        }

        if self.roster.contains(session_id, user_id) {
            return Err(EnrollmentError::DuplicateEnrollment {
                session_id,
                user_id,
            });
        }

        if !can_enroll(self.recruiting_status) {
            return Err(EnrollmentError::NotRecruiting {
                status: self.recruiting_status,
            });
        }

        self.roster.add(session_id, user_id)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn recruiting_status(&self) -> RecruitingStatus {
        self.recruiting_status
    }

    pub fn progress_status(&self) -> ProgressStatus {
        self.progress_status
    }

    pub fn capacity_rule(&self) -> CapacityRule {
        self.capacity_rule
    }

    /// 名簿を返す（読み取り専用）
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

impl PartialEq for EnrollmentPolicy {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity
            && self.recruiting_status == other.recruiting_status
            && self.progress_status == other.progress_status
            && self.roster == other.roster
    }
}

impl Eq for EnrollmentPolicy {}

fn validate_capacity(capacity: i64) -> Result<u32, EnrollmentError> {
    if capacity <= 0 {
        return Err(EnrollmentError::invalid_argument(format!(
            "capacity must be at least 1, got {}",
            capacity
        )));
    }

    u32::try_from(capacity).map_err(|_| {
        EnrollmentError::invalid_argument(format!("capacity {} is too large", capacity))
    })
}
