//! JSON Session Repository Implementation
//!
//! SessionRepositoryのJSON実装（セッションと受講者の行をJSONファイルで永続化）
//!
//! 書き込みはストアの隣の `.lock` ファイルに排他ロックを取ってから
//! 読み込み→検証→置き換えまでを行うため、同じストアを開いた別プロセスとも直列化される。

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::domain::entities::enrollment_policy::EnrollmentPolicy;
use crate::domain::entities::ids::{EnrollmentId, SessionId, UserId};
use crate::domain::entities::roster::{EnrollmentRecord, Roster};
use crate::domain::entities::session::{Session, SessionBody, SessionDate};
use crate::domain::entities::status::{ProgressStatus, RecruitingStatus};
use crate::domain::errors::{EnrollmentError, RepositoryError};
use crate::domain::repositories::session_repository::SessionRepository;
use crate::domain::services::enrollment_rules::has_free_seat;

/// JSONファイルベースのセッションリポジトリ
///
/// プロセス内の書き込みは内部のロックで、プロセス間はロックファイルで直列化する
pub struct JsonSessionRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

/// セッション行（JSON永続化用の内部表現）
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SessionRow {
    id: u64,
    start_date_time: DateTime<Utc>,
    end_date_time: DateTime<Utc>,
    title: String,
    contents: String,
    cover_image: Option<Vec<u8>>,
    capacity: i64,
    session_recruiting_status_id: u64,
    session_progress_status_id: u64,
    /// 更新のたびに進む版（古いストアには無いので0から）
    #[serde(default)]
    revision: u64,
}

/// 受講者行（JSON永続化用の内部表現）
#[derive(Debug, Clone, Deserialize, Serialize)]
struct StudentRow {
    id: u64,
    session_id: u64,
    user_id: u64,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

/// ストア全体
#[derive(Debug, Default, Deserialize, Serialize)]
struct StoreDocument {
    #[serde(default)]
    sessions: Vec<SessionRow>,
    #[serde(default)]
    students: Vec<StudentRow>,
}

impl StoreDocument {
    fn next_session_id(&self) -> u64 {
        self.sessions.iter().map(|row| row.id).max().unwrap_or(0) + 1
    }

    fn next_student_id(&self) -> u64 {
        self.students.iter().map(|row| row.id).max().unwrap_or(0) + 1
    }
}

/// ストアファイルに対するプロセス間の排他ロック
///
/// ドロップ時に解放される。ロックファイル自体は削除しない
/// （削除すると、待機中のプロセスが消えたファイルをロックしてしまう）
struct StoreLock {
    _file: File,
}

impl StoreLock {
    fn acquire(store_path: &Path) -> Result<Self> {
        let lock_path = store_path.with_extension("lock");
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create store directory")?;
            }
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))?;
        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", lock_path.display()))?;

        Ok(Self { _file: file })
    }
}

impl JsonSessionRepository {
    /// 新しいリポジトリを作成
    ///
    /// # Arguments
    ///
    /// * `path` - ストアファイルのパス（存在しなければ空のストアとして扱う）
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルからストアを読み込む（同期処理）
    fn load_sync(path: &Path) -> Result<StoreDocument> {
        if !path.exists() {
            debug!("No session store at {}, starting empty", path.display());
            return Ok(StoreDocument::default());
        }

        let content = fs::read_to_string(path).context("Failed to read session store file")?;

        let document: StoreDocument =
            serde_json::from_str(&content).context("Failed to parse session store JSON")?;

        debug!(
            "Loaded session store: {} sessions, {} students",
            document.sessions.len(),
            document.students.len()
        );

        Ok(document)
    }

    /// ファイルにストアを保存する（同期処理）
    ///
    /// 一時ファイルに書いてから置き換える
    fn save_sync(path: &Path, document: &StoreDocument) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("Failed to create store directory")?;
            }
        }

        let json =
            serde_json::to_string_pretty(document).context("Failed to serialize session store")?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json).context("Failed to write session store file")?;
        fs::rename(&tmp_path, path).context("Failed to replace session store file")?;

        Ok(())
    }

    /// ロックを取った上でストアを読み込み、変更して書き戻す（同期処理）
    ///
    /// `apply` がエラーを返した場合は何も書き込まない
    fn modify_sync<T>(
        path: &Path,
        apply: impl FnOnce(&mut StoreDocument) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let _lock = StoreLock::acquire(path).map_err(RepositoryError::storage)?;

        let mut document = Self::load_sync(path).map_err(RepositoryError::storage)?;
        let value = apply(&mut document)?;
        Self::save_sync(path, &document).map_err(RepositoryError::storage)?;

        Ok(value)
    }

    async fn run_blocking<T, F>(task: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, RepositoryError> + Send + 'static,
    {
        tokio::task::spawn_blocking(task).await.map_err(|e| {
            RepositoryError::storage(anyhow::anyhow!("Failed to spawn blocking task: {}", e))
        })?
    }

    /// 未採番のレコードを保存済みの行に対して再検証して追加する
    ///
    /// 読み込み後に別の書き込みで登録された受講者と重複する場合や、
    /// 保存済みの人数で定員に達している場合は `Conflict` を返す
    fn append_new_students(
        document: &mut StoreDocument,
        session: &Session,
        id: SessionId,
    ) -> Result<usize, RepositoryError> {
        let policy = session.policy();
        let mut stored: HashSet<u64> = document
            .students
            .iter()
            .filter(|student| student.session_id == id.0)
            .map(|student| student.user_id)
            .collect();

        let now = Utc::now();
        let mut next_student_id = document.next_student_id();
        let mut rows = Vec::new();
        for record in policy.roster().new_records() {
            if stored.contains(&record.user_id.0) {
                return Err(RepositoryError::Conflict(
                    EnrollmentError::DuplicateEnrollment {
                        session_id: id,
                        user_id: record.user_id,
                    },
                ));
            }
            if !has_free_seat(policy.capacity_rule(), stored.len(), policy.capacity()) {
                return Err(RepositoryError::Conflict(EnrollmentError::CapacityExceeded {
                    capacity: policy.capacity(),
                    enrolled: stored.len(),
                }));
            }

            stored.insert(record.user_id.0);
            rows.push(StudentRow {
                id: next_student_id,
                session_id: id.0,
                user_id: record.user_id.0,
                created_at: Some(now),
                updated_at: None,
            });
            next_student_id += 1;
        }

        let inserted = rows.len();
        document.students.extend(rows);
        Ok(inserted)
    }

    /// Domain形式から行形式に変換
    fn to_row(id: u64, session: &Session) -> SessionRow {
        let policy = session.policy();
        SessionRow {
            id,
            start_date_time: session.date().start(),
            end_date_time: session.date().end(),
            title: session.body().title.clone(),
            contents: session.body().contents.clone(),
            cover_image: session.body().cover_image.clone(),
            capacity: i64::from(policy.capacity()),
            session_recruiting_status_id: policy.recruiting_status().code(),
            session_progress_status_id: policy.progress_status().code(),
            revision: session.revision(),
        }
    }

    /// 行形式からDomain形式に変換
    fn to_domain(row: &SessionRow, students: &[StudentRow]) -> Result<Session, RepositoryError> {
        let recruiting_status = RecruitingStatus::from_code(row.session_recruiting_status_id)?;
        let progress_status = ProgressStatus::from_code(row.session_progress_status_id)?;

        let records = students
            .iter()
            .filter(|student| student.session_id == row.id)
            .map(|student| EnrollmentRecord {
                id: Some(EnrollmentId(student.id)),
                session_id: SessionId(student.session_id),
                user_id: UserId(student.user_id),
                created_at: student.created_at,
                updated_at: student.updated_at,
            });
        let roster = Roster::from_records(records).map_err(RepositoryError::storage)?;

        let policy =
            EnrollmentPolicy::restore(row.capacity, recruiting_status, progress_status, roster)
                .map_err(RepositoryError::storage)?;
        let date = SessionDate::new(row.start_date_time, row.end_date_time)
            .map_err(RepositoryError::storage)?;
        let body = SessionBody::new(
            row.title.clone(),
            row.contents.clone(),
            row.cover_image.clone(),
        );

        Ok(Session::restore(SessionId(row.id), date, body, policy).with_revision(row.revision))
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn save(&self, session: &Session) -> Result<SessionId, RepositoryError> {
        let _guard = self.lock.lock().await;

        let path = self.path.clone();
        let mut row = Self::to_row(0, session);
        row.revision = 0;
        let id = Self::run_blocking(move || {
            Self::modify_sync(&path, move |document| {
                row.id = document.next_session_id();
                let id = row.id;
                document.sessions.push(row);
                Ok(id)
            })
        })
        .await?;

        info!("Saved session {} to {}", id, self.path.display());

        Ok(SessionId(id))
    }

    async fn find_by_id(&self, id: SessionId) -> Result<Session, RepositoryError> {
        let _guard = self.lock.lock().await;

        // 置き換えはrenameで行うので、読み込みだけならロックファイルは不要
        let path = self.path.clone();
        let document =
            Self::run_blocking(move || Self::load_sync(&path).map_err(RepositoryError::storage))
                .await?;
        let row = document
            .sessions
            .iter()
            .find(|row| row.id == id.0)
            .ok_or(RepositoryError::NotFound(id))?;

        Self::to_domain(row, &document.students)
    }

    async fn update(&self, session: &Session) -> Result<(), RepositoryError> {
        let id = session.id().ok_or_else(|| {
            RepositoryError::storage(anyhow::anyhow!("Cannot update a session that was never saved"))
        })?;

        let _guard = self.lock.lock().await;

        let path = self.path.clone();
        let session = session.clone();
        let result = Self::run_blocking(move || {
            Self::modify_sync(&path, |document| {
                let stored = document
                    .sessions
                    .iter()
                    .find(|row| row.id == id.0)
                    .ok_or(RepositoryError::NotFound(id))?;
                let stored_revision = stored.revision;
                let mut row = Self::to_row(id.0, &session);

                // 読み込み後に他の書き込みがあっても、状態を変えていなければ受講者の追加だけは取り込める
                if stored_revision != session.revision()
                    && (stored.session_recruiting_status_id != row.session_recruiting_status_id
                        || stored.session_progress_status_id != row.session_progress_status_id)
                {
                    return Err(RepositoryError::StaleSession {
                        id,
                        expected: session.revision(),
                        actual: stored_revision,
                    });
                }

                // 既存の受講者行は書き換えず、未採番のレコードだけを追加する
                let inserted = Self::append_new_students(document, &session, id)?;

                row.revision = stored_revision + 1;
                if let Some(slot) = document.sessions.iter_mut().find(|r| r.id == id.0) {
                    *slot = row;
                }
                Ok(inserted)
            })
        })
        .await;

        match result {
            Ok(inserted) => {
                info!("Updated session {} ({} new students)", id, inserted);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected update of session {}: {}", id, e);
                Err(e)
            }
        }
    }
}
