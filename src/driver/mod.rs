//! # Driver Layer (Presentation)
//!
//! CLIを提供
//!
//! ## 特徴
//!
//! - Use Caseを呼び出してビジネスフローを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - ユーザーとのインターフェース
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **workflow**: コマンドのディスパッチ

pub mod cli;
pub mod workflow;

pub use cli::Args;
pub use workflow::EnrollmentWorkflow;
