//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部I/Oを持たない
//! - フレームワークに依存しない
//! - データベースやCLIについて何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（Session, EnrollmentPolicy, Rosterなど）
//! - **errors**: ドメインとリポジトリ境界のエラー
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（ビジネスルール）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
