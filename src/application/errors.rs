//! # Service Errors
//!
//! ユースケースが返すエラー

use thiserror::Error;

use crate::domain::errors::{EnrollmentError, RepositoryError};

/// ユースケースのエラー
///
/// ドメインとリポジトリのエラーをそのまま透過する。
/// 保存時の再検証で検出された `Conflict` は、メモリ上の検証と同じ種別で返す。
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Enrollment(#[from] EnrollmentError),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(e) => ServiceError::Enrollment(e),
            other => ServiceError::Repository(other),
        }
    }
}
