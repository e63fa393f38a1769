//! ユースケースのテスト用モックリポジトリ

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::dto::open_session_input::OpenSessionInput;
use crate::domain::entities::ids::SessionId;
use crate::domain::entities::session::Session;
use crate::domain::errors::RepositoryError;
use crate::domain::repositories::session_repository::SessionRepository;

/// メモリ上にセッションを保持するモック
///
/// `update` では未永続化レコードにIDを振る代わりにそのまま保持する
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<SessionId, Session>>,
    next_id: Mutex<u64>,
    update_calls: Mutex<usize>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
            update_calls: Mutex::new(0),
        }
    }

    pub fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.lock().unwrap().get(&id).cloned()
    }

    pub fn updates(&self) -> usize {
        *self.update_calls.lock().unwrap()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &Session) -> Result<SessionId, RepositoryError> {
        let mut next_id = self.next_id.lock().unwrap();
        let id = SessionId(*next_id);
        *next_id += 1;

        let stored = Session::restore(
            id,
            *session.date(),
            session.body().clone(),
            session.policy().clone(),
        );
        self.sessions.lock().unwrap().insert(id, stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: SessionId) -> Result<Session, RepositoryError> {
        self.get(id).ok_or(RepositoryError::NotFound(id))
    }

    async fn update(&self, session: &Session) -> Result<(), RepositoryError> {
        let id = session
            .id()
            .ok_or_else(|| RepositoryError::storage(anyhow::anyhow!("session has no id")))?;
        let mut sessions = self.sessions.lock().unwrap();
        if !sessions.contains_key(&id) {
            return Err(RepositoryError::NotFound(id));
        }
        sessions.insert(id, session.clone());
        *self.update_calls.lock().unwrap() += 1;
        Ok(())
    }
}

pub fn open_input(capacity: i64) -> OpenSessionInput {
    OpenSessionInput::new(
        Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 4, 30, 18, 0, 0).unwrap(),
        "Rust入門".to_string(),
        "所有権と借用".to_string(),
        capacity,
    )
}

