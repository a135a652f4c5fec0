use chrono::Utc;
use kit::testing::TestDatabase;
use kit::FrameworkError;
use pretty_assertions::assert_eq;
use sea_orm::Set;
use taskboard::migrations::Migrator;
use taskboard::models::tasks::{ActiveModel, TaskDraft, TaskPatch};
use taskboard::repositories::{SeaOrmTaskRepository, TaskRepository};

async fn repository() -> (TestDatabase, SeaOrmTaskRepository) {
    let db = TestDatabase::fresh::<Migrator>().await.unwrap();
    let repo = SeaOrmTaskRepository::new(db.connection());
    (db, repo)
}

#[tokio::test]
async fn insert_assigns_id_and_created_at() {
    let (_db, repo) = repository().await;
    let before = Utc::now().naive_utc();

    let task = repo.save(TaskDraft::new("Buy milk").into_active_model()).await.unwrap();

    assert!(task.id > 0);
    assert_eq!(task.description, "Buy milk");
    assert!(!task.completed);
    assert!(task.created_at >= before);
}

#[tokio::test]
async fn find_all_orders_by_id() {
    let (_db, repo) = repository().await;
    for description in ["first", "second", "third"] {
        repo.save(TaskDraft::new(description).into_active_model()).await.unwrap();
    }

    let descriptions: Vec<String> = repo
        .find_all()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.description)
        .collect();

    assert_eq!(descriptions, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn update_keeps_created_at() {
    let (_db, repo) = repository().await;
    let task = repo.save(TaskDraft::new("Buy milk").into_active_model()).await.unwrap();

    let updated = repo
        .save(TaskPatch::completed(true).apply_to(task.clone()))
        .await
        .unwrap();

    assert_eq!(updated.id, task.id);
    assert!(updated.completed);
    assert_eq!(updated.created_at, task.created_at);
    assert_eq!(repo.find_by_id(task.id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn update_of_deleted_row_does_not_resurrect_it() {
    let (_db, repo) = repository().await;
    let task = repo.save(TaskDraft::new("Buy milk").into_active_model()).await.unwrap();
    assert!(repo.delete_by_id(task.id).await.unwrap());

    let err = repo
        .save(TaskPatch::description("Buy oat milk").apply_to(task.clone()))
        .await
        .unwrap_err();

    assert!(matches!(err, FrameworkError::ModelNotFound { .. }));
    assert!(!repo.exists_by_id(task.id).await.unwrap());
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_reports_affected_rows() {
    let (_db, repo) = repository().await;
    let task = repo.save(TaskDraft::new("Call mom").into_active_model()).await.unwrap();

    assert!(repo.exists_by_id(task.id).await.unwrap());
    assert!(repo.delete_by_id(task.id).await.unwrap());
    assert!(!repo.delete_by_id(task.id).await.unwrap());
    assert_eq!(repo.find_by_id(task.id).await.unwrap(), None);
}

#[tokio::test]
async fn insert_ignores_caller_created_at() {
    let (_db, repo) = repository().await;
    let stale = Utc::now().naive_utc() - chrono::Duration::days(30);
    let model = ActiveModel {
        description: Set("Backdated".to_string()),
        completed: Set(false),
        created_at: Set(stale),
        ..Default::default()
    };

    let task = repo.save(model).await.unwrap();

    assert!(task.created_at > stale);
}
