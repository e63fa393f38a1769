//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **OpenSessionUseCase**: セッションの開設
//! - **ChangeStatusUseCase**: 募集状態・進行状態の変更
//! - **EnrollStudentUseCase**: 受講登録
//! - **GetSessionUseCase**: セッションの照会

pub mod change_status;
pub mod enroll_student;
pub mod get_session;
pub mod open_session;

#[cfg(test)]
mod test_support;
