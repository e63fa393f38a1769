//! # Domain Errors
//!
//! 受講登録とリポジトリ境界のエラー種別
//!
//! いずれも呼び出し元へ同期的に返され、内部でのリトライは行わない。

use thiserror::Error;

use super::entities::ids::{SessionId, UserId};
use super::entities::status::RecruitingStatus;

/// 受講登録ドメインのエラー
///
/// 失敗時に名簿が変更されることはない（検証は全て追加より前に行う）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    /// 不正な引数（定員が0以下など）
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// 定員超過
    #[error("capacity exceeded: {enrolled} enrolled, capacity {capacity}")]
    CapacityExceeded { capacity: u32, enrolled: usize },

    /// 同じ (session, user) の組み合わせで登録済み
    #[error("user {user_id} is already enrolled in session {session_id}")]
    DuplicateEnrollment {
        session_id: SessionId,
        user_id: UserId,
    },

    /// 募集中ではない
    #[error("session is not recruiting (status: {status})")]
    NotRecruiting { status: RecruitingStatus },
}

impl EnrollmentError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        EnrollmentError::InvalidArgument(message.into())
    }
}

/// リポジトリ境界のエラー
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// 指定IDのセッションが存在しない
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// 保存済みの状態と矛盾する書き込み（別プロセスが先に登録した場合など）
    ///
    /// 中身は保存済みの名簿に対して再検証した結果
    #[error("conflicting update: {0}")]
    Conflict(EnrollmentError),

    /// 読み込み後に別の書き込みで更新された古い集約
    #[error("session {id} was modified concurrently (expected revision {expected}, found {actual})")]
    StaleSession {
        id: SessionId,
        expected: u64,
        actual: u64,
    },

    /// 永続化層の失敗（I/O、パース、コード値の復元など）
    #[error("storage failure: {0:#}")]
    StorageFailure(anyhow::Error),
}

impl RepositoryError {
    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        RepositoryError::StorageFailure(err.into())
    }
}
