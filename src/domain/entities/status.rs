//! # Session Status
//!
//! 募集状態と進行状態
//!
//! どちらも振る舞いを持たない単純なタグ値。
//! 受講登録の可否判定は `domain::services::enrollment_rules` に置く。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::RepositoryError;

/// 募集状態
///
/// `Ready` -> `Recruiting` -> `End` の順に進む
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitingStatus {
    /// 募集前
    #[default]
    Ready,
    /// 募集中
    Recruiting,
    /// 募集終了
    End,
}

impl RecruitingStatus {
    /// 永続化用のコード値を返す
    pub fn code(self) -> u64 {
        match self {
            RecruitingStatus::Ready => 1,
            RecruitingStatus::Recruiting => 2,
            RecruitingStatus::End => 3,
        }
    }

    /// コード値から復元する
    ///
    /// # Errors
    ///
    /// 未知のコードの場合は `StorageFailure` を返す
    pub fn from_code(code: u64) -> Result<Self, RepositoryError> {
        match code {
            1 => Ok(RecruitingStatus::Ready),
            2 => Ok(RecruitingStatus::Recruiting),
            3 => Ok(RecruitingStatus::End),
            other => Err(RepositoryError::storage(anyhow::anyhow!(
                "unknown recruiting status code: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for RecruitingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecruitingStatus::Ready => "READY",
            RecruitingStatus::Recruiting => "RECRUITING",
            RecruitingStatus::End => "END",
        };
        write!(f, "{}", s)
    }
}

/// 進行状態
///
/// 受講登録の可否には影響しない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    Preparing,
    InProgress,
    Finished,
}

impl ProgressStatus {
    pub fn code(self) -> u64 {
        match self {
            ProgressStatus::Preparing => 1,
            ProgressStatus::InProgress => 2,
            ProgressStatus::Finished => 3,
        }
    }

    /// コード値から復元する
    ///
    /// # Errors
    ///
    /// 未知のコードの場合は `StorageFailure` を返す
    pub fn from_code(code: u64) -> Result<Self, RepositoryError> {
        match code {
            1 => Ok(ProgressStatus::Preparing),
            2 => Ok(ProgressStatus::InProgress),
            3 => Ok(ProgressStatus::Finished),
            other => Err(RepositoryError::storage(anyhow::anyhow!(
                "unknown progress status code: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProgressStatus::Preparing => "PREPARING",
            ProgressStatus::InProgress => "IN_PROGRESS",
            ProgressStatus::Finished => "FINISHED",
        };
        write!(f, "{}", s)
    }
}
