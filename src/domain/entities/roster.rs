//! # Roster Entity
//!
//! 受講者名簿と受講登録レコード

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::ids::{EnrollmentId, SessionId, UserId};
use crate::domain::errors::EnrollmentError;

/// 受講登録レコード
///
/// 1件の (session, user) の関連と監査用タイムスタンプ。
/// `id` が `None` のものはまだ永続化されていない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub id: Option<EnrollmentId>,
    pub session_id: SessionId,
    pub user_id: UserId,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl EnrollmentRecord {
    /// 未永続化のレコードを作成
    pub fn new(session_id: SessionId, user_id: UserId) -> Self {
        Self {
            id: None,
            session_id,
            user_id,
            created_at: None,
            updated_at: None,
        }
    }

    /// 永続化済みかどうか
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    fn key(&self) -> (SessionId, UserId) {
        (self.session_id, self.user_id)
    }
}

/// 受講者名簿
///
/// (session, user) の組み合わせで一意なレコードの集合。
/// 追加のみで、削除や更新の操作は持たない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    records: HashMap<(SessionId, UserId), EnrollmentRecord>,
}

impl Roster {
    /// 空の名簿を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 永続化済みレコードから名簿を復元
    ///
    /// # Errors
    ///
    /// 同じ (session, user) のレコードが複数ある場合に `DuplicateEnrollment` を返す
    pub fn from_records(
        records: impl IntoIterator<Item = EnrollmentRecord>,
    ) -> Result<Self, EnrollmentError> {
        let mut roster = Self::new();
        for record in records {
            roster.insert(record)?;
        }
        Ok(roster)
    }

    /// 登録数を返す
    #[inline]
    pub fn size(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (session, user) の登録があるかどうか
    pub fn contains(&self, session_id: SessionId, user_id: UserId) -> bool {
        self.records.contains_key(&(session_id, user_id))
    }

    /// 未永続化のレコードを追加
    ///
    /// # Errors
    ///
    /// 既に同じ組み合わせが存在する場合に `DuplicateEnrollment` を返す
    pub fn add(&mut self, session_id: SessionId, user_id: UserId) -> Result<(), EnrollmentError> {
        self.insert(EnrollmentRecord::new(session_id, user_id))
    }

    /// 全レコードを返す（順序は不定）
    pub fn records(&self) -> impl Iterator<Item = &EnrollmentRecord> {
        self.records.values()
    }

    /// まだIDが割り当てられていないレコードを返す
    pub fn new_records(&self) -> impl Iterator<Item = &EnrollmentRecord> {
        self.records.values().filter(|record| !record.is_persisted())
    }

    /// 登録済みユーザーIDを昇順で返す
    pub fn user_ids(&self) -> Vec<UserId> {
        let mut ids: Vec<UserId> = self.records.values().map(|r| r.user_id).collect();
        ids.sort();
        ids
    }

    fn insert(&mut self, record: EnrollmentRecord) -> Result<(), EnrollmentError> {
        let key = record.key();
        if self.records.contains_key(&key) {
            return Err(EnrollmentError::DuplicateEnrollment {
                session_id: key.0,
                user_id: key.1,
            });
        }
        self.records.insert(key, record);
        Ok(())
    }
}
