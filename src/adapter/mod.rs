//! Adapter Layer
//!
//! 外部システム（設定ファイル、JSONストア）との統合

pub mod config;
pub mod repositories;
