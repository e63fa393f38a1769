//! # Session Locks
//!
//! セッション単位の排他制御
//!
//! ドメイン層はロックを持たないため、読み込み -> 変更 -> 保存 の一連の処理を
//! 同一プロセス内でセッションごとに直列化する。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::entities::ids::SessionId;

/// セッションIDごとの非同期ロックのレジストリ
///
/// 誰も保持・待機していないエントリはガードの解放時に取り除かれる
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>,
}

/// `SessionLocks::acquire` が返すガード
///
/// ドロップ時にロックを解放し、他に待機者がいなければレジストリから取り除く
#[derive(Debug)]
pub struct SessionLockGuard<'a> {
    locks: &'a SessionLocks,
    id: SessionId,
    _guard: OwnedMutexGuard<()>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, HashMap<SessionId, Arc<AsyncMutex<()>>>> {
        // poisoned でも中身は () なので、そのまま使い続けて問題ない
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// セッションのロックを取得する
    ///
    /// 返されたガードがドロップされるまで、同じセッションへの他の取得は待機する
    pub async fn acquire(&self, id: SessionId) -> SessionLockGuard<'_> {
        let lock = self.registry().entry(id).or_default().clone();
        let guard = lock.lock_owned().await;
        SessionLockGuard {
            locks: self,
            id,
            _guard: guard,
        }
    }

    /// 登録中のセッション数
    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for SessionLockGuard<'_> {
    fn drop(&mut self) {
        let mut locks = self.locks.registry();
        // レジストリとこのガードの2つだけなら、待機者はいない
        if locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 2)
        {
            locks.remove(&self.id);
        }
    }
}
