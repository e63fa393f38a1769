//! Workflow Orchestration
//!
//! コマンドのディスパッチ

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::sync::Arc;

use crate::adapter::config::Config;
use crate::adapter::repositories::json_session_repository::JsonSessionRepository;
use crate::application::dto::open_session_input::OpenSessionInput;
use crate::application::dto::session_summary::SessionSummary;
use crate::application::locks::SessionLocks;
use crate::application::use_cases::change_status::{ChangeStatusUseCase, StatusTransition};
use crate::application::use_cases::enroll_student::EnrollStudentUseCase;
use crate::application::use_cases::get_session::GetSessionUseCase;
use crate::application::use_cases::open_session::OpenSessionUseCase;
use crate::domain::entities::ids::{SessionId, UserId};

use super::cli::{Args, Command, Phase};

/// Map a CLI phase to a recruiting transition
pub fn recruit_transition(phase: Phase) -> StatusTransition {
    match phase {
        Phase::Start => StatusTransition::StartRecruiting,
        Phase::End => StatusTransition::EndRecruiting,
    }
}

/// Map a CLI phase to a progress transition
pub fn progress_transition(phase: Phase) -> StatusTransition {
    match phase {
        Phase::Start => StatusTransition::StartProgress,
        Phase::End => StatusTransition::EndProgress,
    }
}

/// Enrollment Workflow
pub struct EnrollmentWorkflow {
    open_use_case: OpenSessionUseCase<JsonSessionRepository>,
    status_use_case: ChangeStatusUseCase<JsonSessionRepository>,
    enroll_use_case: EnrollStudentUseCase<JsonSessionRepository>,
    get_use_case: GetSessionUseCase<JsonSessionRepository>,
}

impl EnrollmentWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Self {
        let session_repo = Arc::new(JsonSessionRepository::new(config.store_path.clone()));
        let locks = Arc::new(SessionLocks::new());

        info!(
            "Using session store {} (capacity rule: {:?})",
            config.store_path, config.capacity_rule
        );

        Self {
            open_use_case: OpenSessionUseCase::new(session_repo.clone()),
            status_use_case: ChangeStatusUseCase::new(session_repo.clone(), locks.clone()),
            enroll_use_case: EnrollStudentUseCase::new(
                session_repo.clone(),
                locks,
                config.capacity_rule,
            ),
            get_use_case: GetSessionUseCase::new(session_repo),
        }
    }

    /// Execute a single CLI command
    pub async fn execute(&self, args: Args) -> Result<()> {
        match args.command {
            Command::Open {
                title,
                start,
                end,
                capacity,
                contents,
                cover_image,
            } => {
                let mut input = OpenSessionInput::new(start, end, title, contents, capacity);
                if let Some(path) = cover_image {
                    let image = fs::read(&path)
                        .with_context(|| format!("Failed to read cover image: {}", path))?;
                    input = input.with_cover_image(image);
                }

                let id = self.open_use_case.execute(input).await?;
                println!("✓ Opened session {}", id);
            }
            Command::Recruit { id, phase } => {
                let summary = self
                    .status_use_case
                    .execute(SessionId(id), recruit_transition(phase))
                    .await?;
                println!(
                    "✓ Session {} recruiting status: {}",
                    id, summary.recruiting_status
                );
            }
            Command::Progress { id, phase } => {
                let summary = self
                    .status_use_case
                    .execute(SessionId(id), progress_transition(phase))
                    .await?;
                println!(
                    "✓ Session {} progress status: {}",
                    id, summary.progress_status
                );
            }
            Command::Enroll { id, user } => {
                let summary = self
                    .enroll_use_case
                    .execute(SessionId(id), UserId(user))
                    .await?;
                println!(
                    "✓ Enrolled user {} into session {} ({} seats left)",
                    user,
                    id,
                    summary.seats_left()
                );
            }
            Command::Show { id } => {
                let summary = self.get_use_case.execute(SessionId(id)).await?;
                print_summary(&summary);
            }
        }

        Ok(())
    }
}

fn print_summary(summary: &SessionSummary) {
    let id = summary
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    println!("Session {}: {}", id, summary.title);
    println!(
        "  Schedule: {} - {}",
        summary.start.to_rfc3339(),
        summary.end.to_rfc3339()
    );
    println!(
        "  Status: recruiting={} progress={}",
        summary.recruiting_status, summary.progress_status
    );
    println!(
        "  Enrolled: {}/{}",
        summary.enrolled_users.len(),
        summary.capacity
    );
    for user in &summary.enrolled_users {
        println!("    - user {}", user);
    }
}
