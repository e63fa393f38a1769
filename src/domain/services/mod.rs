//! # Domain Services
//!
//! 状態の型から切り離したビジネスルール

pub mod enrollment_rules;
