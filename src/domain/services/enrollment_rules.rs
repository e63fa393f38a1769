//! # Enrollment Rules
//!
//! 受講登録の可否を判定するルール

use serde::{Deserialize, Serialize};

use crate::domain::entities::status::RecruitingStatus;

/// 定員判定のルール
///
/// 旧来の実装は「登録数 > 定員」でのみ拒否していたため、定員+1人まで登録できた。
/// `Strict` はこれを「登録数 >= 定員」に修正したもの。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityRule {
    /// 登録数が定員に達したら拒否
    #[default]
    Strict,
    /// 登録数が定員を超えている場合のみ拒否（旧来の挙動）
    Lenient,
}

/// 現在の募集状態で受講登録できるかどうか
pub fn can_enroll(status: RecruitingStatus) -> bool {
    matches!(status, RecruitingStatus::Recruiting)
}

/// 空席があるかどうか
///
/// # Arguments
///
/// * `rule` - 定員判定のルール
/// * `enrolled` - 現在の登録数
/// * `capacity` - 定員
pub fn has_free_seat(rule: CapacityRule, enrolled: usize, capacity: u32) -> bool {
    let capacity = capacity as usize;
    match rule {
        CapacityRule::Strict => enrolled < capacity,
        CapacityRule::Lenient => enrolled <= capacity,
    }
}
