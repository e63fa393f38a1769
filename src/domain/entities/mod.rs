//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Session**: 開講セッションの集約
//! - **EnrollmentPolicy**: 定員・募集状態・名簿
//! - **Roster / EnrollmentRecord**: 受講者名簿と登録レコード

pub mod enrollment_policy;
pub mod ids;
pub mod roster;
pub mod session;
pub mod status;
