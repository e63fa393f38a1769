//! Workflow Integration Tests
//!
//! EnrollmentWorkflow の統合テスト

use clap::Parser;
use coursereg::adapter::config::Config;
use coursereg::adapter::repositories::json_session_repository::JsonSessionRepository;
use coursereg::domain::entities::ids::{SessionId, UserId};
use coursereg::domain::entities::status::RecruitingStatus;
use coursereg::domain::repositories::session_repository::SessionRepository;
use coursereg::driver::cli::Args;
use coursereg::driver::workflow::EnrollmentWorkflow;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// テスト用のConfigファイルを作成
fn create_test_config(dir: &Path, capacity_rule: &str) -> String {
    let config_path = dir.join("config.json");
    let store_path = dir.join("data").join("sessions.json");
    let config_content = format!(
        r#"{{
  "store_path": "{}",
  "capacity_rule": "{}"
}}"#,
        store_path.to_string_lossy(),
        capacity_rule
    );
    fs::write(&config_path, config_content).unwrap();
    config_path.to_string_lossy().to_string()
}

async fn run(config_path: &str, argv: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["coursereg", "-c", config_path];
    full.extend_from_slice(argv);
    let args = Args::parse_from(full);

    let config = Config::load(&args.config).unwrap();
    let workflow = EnrollmentWorkflow::new(config);
    workflow.execute(args).await
}

fn open_args() -> Vec<&'static str> {
    vec![
        "open",
        "--title",
        "Rust入門",
        "--start",
        "2024-04-01T09:00:00Z",
        "--end",
        "2024-04-30T18:00:00Z",
        "--capacity",
        "2",
    ]
}

#[tokio::test]
async fn test_workflow_open_recruit_enroll_show() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "strict");

    run(&config_path, &open_args()).await.unwrap();
    run(&config_path, &["recruit", "1", "start"]).await.unwrap();
    run(&config_path, &["enroll", "1", "--user", "10"]).await.unwrap();
    run(&config_path, &["enroll", "1", "--user", "20"]).await.unwrap();
    run(&config_path, &["show", "1"]).await.unwrap();

    // 定員2で3人目は拒否される
    let result = run(&config_path, &["enroll", "1", "--user", "30"]).await;
    assert!(result.is_err());

    let repo = JsonSessionRepository::new(temp_dir.path().join("data").join("sessions.json"));
    let session = repo.find_by_id(SessionId(1)).await.unwrap();
    assert_eq!(
        session.policy().recruiting_status(),
        RecruitingStatus::Recruiting
    );
    assert_eq!(
        session.policy().roster().user_ids(),
        vec![UserId(10), UserId(20)]
    );
}

#[tokio::test]
async fn test_workflow_lenient_rule_admits_one_extra() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "lenient");

    run(&config_path, &open_args()).await.unwrap();
    run(&config_path, &["recruit", "1", "start"]).await.unwrap();
    for user in ["1", "2", "3"] {
        run(&config_path, &["enroll", "1", "--user", user])
            .await
            .unwrap();
    }

    let result = run(&config_path, &["enroll", "1", "--user", "4"]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_workflow_enroll_before_recruiting_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "strict");

    run(&config_path, &open_args()).await.unwrap();

    let result = run(&config_path, &["enroll", "1", "--user", "10"]).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("not recruiting"), "got: {}", err);
}

#[tokio::test]
async fn test_workflow_show_unknown_session() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "strict");

    let result = run(&config_path, &["show", "9"]).await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("session 9 not found"), "got: {}", err);
}

#[tokio::test]
async fn test_workflow_open_with_cover_image() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "strict");
    let image_path = temp_dir.path().join("cover.png");
    fs::write(&image_path, [0x89, 0x50, 0x4e, 0x47]).unwrap();
    let image_arg = image_path.to_string_lossy().to_string();

    let mut argv: Vec<&str> = open_args();
    argv.extend_from_slice(&["--cover-image", &image_arg]);
    run(&config_path, &argv).await.unwrap();

    let repo = JsonSessionRepository::new(temp_dir.path().join("data").join("sessions.json"));
    let session = repo.find_by_id(SessionId(1)).await.unwrap();
    assert_eq!(
        session.body().cover_image.as_deref(),
        Some(&[0x89u8, 0x50, 0x4e, 0x47][..])
    );
}

#[tokio::test]
async fn test_workflow_open_rejects_zero_capacity() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = create_test_config(temp_dir.path(), "strict");

    let mut argv = open_args();
    let last = argv.len() - 1;
    argv[last] = "0";

    let result = run(&config_path, &argv).await;

    assert!(result.is_err());
    assert!(!temp_dir.path().join("data").join("sessions.json").exists());
}
