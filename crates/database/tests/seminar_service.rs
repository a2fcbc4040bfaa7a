use database::{
    entities::{seminar_participants, seminars, users},
    error::ServiceError,
    services::{category::CategoryService, seminar::SeminarService},
};
use migration::{Migrator, MigratorTrait};
use models::{
    seminar_data::SeminarForm,
    validation::{Field, ValidationRules},
};
use sea_orm::{
    ActiveValue::Set, ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
};

const ORGANIZER: &str = "organizer-1";
const PARTICIPANT: &str = "participant-1";

async fn setup() -> DatabaseConnection {
    // A single connection keeps the in-memory database alive and shared
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    users::Entity::insert_many([
        users::ActiveModel {
            id: Set(ORGANIZER.to_string()),
            user_name: Set(Some("organizer@seminars.test".to_string())),
        },
        users::ActiveModel {
            id: Set(PARTICIPANT.to_string()),
            user_name: Set(Some("participant@seminars.test".to_string())),
        },
    ])
    .exec_without_returning(&db)
    .await
    .unwrap();

    db
}

fn form() -> SeminarForm {
    SeminarForm {
        topic: "AI Basics".to_string(),
        lecturer: "Ada Lovelace".to_string(),
        details: "Neural networks from first principles.".to_string(),
        date_and_time: "03/15/2025 14:00".to_string(),
        duration: Some(60),
        category_id: 1,
    }
}

async fn create(db: &DatabaseConnection) -> i32 {
    SeminarService::create_seminar(db, &ValidationRules::default(), ORGANIZER, form())
        .await
        .unwrap()
}

async fn membership_count(db: &DatabaseConnection) -> u64 {
    seminar_participants::Entity::find().count(db).await.unwrap()
}

#[tokio::test]
async fn test_create_then_details_round_trips() {
    let db = setup().await;
    let id = create(&db).await;

    let details = SeminarService::get_details(&db, id).await.unwrap();
    assert_eq!(details.id, id);
    assert_eq!(details.topic, "AI Basics");
    assert_eq!(details.lecturer, "Ada Lovelace");
    assert_eq!(details.details, "Neural networks from first principles.");
    assert_eq!(details.date_and_time, "03/15/2025 14:00");
    assert_eq!(details.duration, 60);
    assert_eq!(details.category, "Technology");
    assert_eq!(details.organizer, "organizer@seminars.test");

    let stored = seminars::Entity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert_eq!(stored.organizer_id, ORGANIZER);
    assert!(!stored.is_deleted);
}

#[tokio::test]
async fn test_create_rejects_malformed_date() {
    let db = setup().await;
    let bad = SeminarForm {
        date_and_time: "2025-03-15 14:00".to_string(),
        ..form()
    };

    let err = SeminarService::create_seminar(&db, &ValidationRules::default(), ORGANIZER, bad)
        .await
        .unwrap_err();
    match err {
        ServiceError::Validation(errors) => {
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::DateAndTime]);
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    assert_eq!(seminars::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_rejects_unknown_category_with_other_errors() {
    let db = setup().await;
    let bad = SeminarForm {
        topic: "AI".to_string(),
        category_id: 99,
        ..form()
    };

    let err = SeminarService::create_seminar(&db, &ValidationRules::default(), ORGANIZER, bad)
        .await
        .unwrap_err();
    let ServiceError::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert!(errors.contains(Field::Topic));
    assert!(errors.contains(Field::CategoryId));
}

#[tokio::test]
async fn test_soft_delete_hides_seminar_everywhere() {
    let db = setup().await;
    let id = create(&db).await;
    SeminarService::join(&db, id, PARTICIPANT).await.unwrap();

    let all = SeminarService::list_all(&db).await.unwrap();
    assert!(all.iter().any(|s| s.id == id && s.topic == "AI Basics"));

    SeminarService::soft_delete(&db, id, ORGANIZER).await.unwrap();

    assert!(SeminarService::list_all(&db).await.unwrap().is_empty());
    assert!(
        SeminarService::list_joined(&db, PARTICIPANT)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(matches!(
        SeminarService::get_details(&db, id).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        SeminarService::get_edit_form(&db, id).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        SeminarService::leave(&db, id, PARTICIPANT).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        SeminarService::join(&db, id, "participant-2").await,
        Err(ServiceError::NotFound)
    ));

    // The membership row is orphaned, not removed
    assert_eq!(membership_count(&db).await, 1);
}

#[tokio::test]
async fn test_soft_delete_is_one_way() {
    let db = setup().await;
    let id = create(&db).await;
    SeminarService::soft_delete(&db, id, ORGANIZER).await.unwrap();

    assert!(matches!(
        SeminarService::soft_delete(&db, id, ORGANIZER).await,
        Err(ServiceError::NotFound)
    ));
    assert!(matches!(
        SeminarService::edit_seminar(&db, &ValidationRules::default(), id, ORGANIZER, form())
            .await,
        Err(ServiceError::NotFound)
    ));

    let stored = seminars::Entity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert!(stored.is_deleted);
}

#[tokio::test]
async fn test_soft_delete_requires_organizer() {
    let db = setup().await;
    let id = create(&db).await;

    assert!(matches!(
        SeminarService::soft_delete(&db, id, PARTICIPANT).await,
        Err(ServiceError::Forbidden)
    ));
    assert_eq!(SeminarService::list_all(&db).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_all_with_unknown_organizer() {
    let db = setup().await;
    SeminarService::create_seminar(&db, &ValidationRules::default(), "ghost", form())
        .await
        .unwrap();

    let all = SeminarService::list_all(&db).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].organizer, "");
    assert_eq!(all[0].category, "Technology");
}

#[tokio::test]
async fn test_join_twice_keeps_one_row() {
    let db = setup().await;
    let id = create(&db).await;

    SeminarService::join(&db, id, PARTICIPANT).await.unwrap();
    let err = SeminarService::join(&db, id, PARTICIPANT).await.unwrap_err();

    assert!(matches!(err, ServiceError::AlreadyJoined));
    assert!(err.is_not_found());
    assert_eq!(membership_count(&db).await, 1);
}

#[tokio::test]
async fn test_join_missing_seminar() {
    let db = setup().await;

    assert!(matches!(
        SeminarService::join(&db, 42, PARTICIPANT).await,
        Err(ServiceError::NotFound)
    ));
    assert_eq!(membership_count(&db).await, 0);
}

#[tokio::test]
async fn test_duplicate_membership_maps_to_constraint_violation() {
    let db = setup().await;
    let id = create(&db).await;

    let membership = || seminar_participants::ActiveModel {
        seminar_id: Set(id),
        participant_id: Set(PARTICIPANT.to_string()),
    };
    seminar_participants::Entity::insert(membership())
        .exec_without_returning(&db)
        .await
        .unwrap();

    let err = seminar_participants::Entity::insert(membership())
        .exec_without_returning(&db)
        .await
        .map_err(ServiceError::from_insert)
        .unwrap_err();
    assert!(matches!(err, ServiceError::ConstraintViolation));
    assert!(err.is_not_found());
    assert_eq!(membership_count(&db).await, 1);
}

#[tokio::test]
async fn test_create_without_category_names_category_field() {
    let db = setup().await;
    let form: SeminarForm = serde_json::from_str(
        r#"{
            "topic": "AI Basics",
            "lecturer": "Ada Lovelace",
            "details": "Neural networks from first principles.",
            "date_and_time": "03/15/2025 14:00",
            "duration": 60
        }"#,
    )
    .unwrap();

    let err = SeminarService::create_seminar(&db, &ValidationRules::default(), ORGANIZER, form)
        .await
        .unwrap_err();
    let ServiceError::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::CategoryId]);
}

#[tokio::test]
async fn test_leave_then_join_lists_once() {
    let db = setup().await;
    let id = create(&db).await;

    SeminarService::join(&db, id, PARTICIPANT).await.unwrap();
    SeminarService::leave(&db, id, PARTICIPANT).await.unwrap();
    assert!(
        SeminarService::list_joined(&db, PARTICIPANT)
            .await
            .unwrap()
            .is_empty()
    );

    SeminarService::join(&db, id, PARTICIPANT).await.unwrap();
    let joined = SeminarService::list_joined(&db, PARTICIPANT).await.unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].id, id);
    assert_eq!(joined[0].organizer, "organizer@seminars.test");
    assert_eq!(membership_count(&db).await, 1);
}

#[tokio::test]
async fn test_list_joined_is_per_participant() {
    let db = setup().await;
    let first = create(&db).await;
    let second = create(&db).await;

    SeminarService::join(&db, first, PARTICIPANT).await.unwrap();
    SeminarService::join(&db, second, ORGANIZER).await.unwrap();

    let joined = SeminarService::list_joined(&db, PARTICIPANT).await.unwrap();
    assert_eq!(joined.iter().map(|s| s.id).collect::<Vec<_>>(), vec![first]);
}

#[tokio::test]
async fn test_leave_without_membership() {
    let db = setup().await;
    let id = create(&db).await;

    assert!(matches!(
        SeminarService::leave(&db, id, PARTICIPANT).await,
        Err(ServiceError::NotFound)
    ));
}

#[tokio::test]
async fn test_edit_out_of_range_duration_leaves_seminar_unchanged() {
    let db = setup().await;
    let id = create(&db).await;
    let before = seminars::Entity::find_by_id(id).one(&db).await.unwrap();

    let edit = SeminarForm {
        topic: "Deep Learning".to_string(),
        duration: Some(1000),
        ..form()
    };
    let err = SeminarService::edit_seminar(&db, &ValidationRules::default(), id, ORGANIZER, edit)
        .await
        .unwrap_err();

    let ServiceError::Validation(errors) = err else {
        panic!("expected a validation error");
    };
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Duration]);

    let after = seminars::Entity::find_by_id(id).one(&db).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_edit_overwrites_fields_but_not_organizer() {
    let db = setup().await;
    let id = create(&db).await;

    let edit = SeminarForm {
        topic: "Deep Learning".to_string(),
        lecturer: "Alan Turing".to_string(),
        details: "Convolutions, attention and everything after.".to_string(),
        date_and_time: "12/31/2025 09:15".to_string(),
        duration: Some(120),
        category_id: 3,
    };
    SeminarService::edit_seminar(&db, &ValidationRules::default(), id, ORGANIZER, edit.clone())
        .await
        .unwrap();

    let edit_form = SeminarService::get_edit_form(&db, id).await.unwrap();
    assert_eq!(edit_form.form, edit);

    let details = SeminarService::get_details(&db, id).await.unwrap();
    assert_eq!(details.category, "Science");
    assert_eq!(details.organizer, "organizer@seminars.test");
}

#[tokio::test]
async fn test_edit_requires_organizer() {
    let db = setup().await;
    let id = create(&db).await;

    let edit = SeminarForm {
        topic: "Hijacked".to_string(),
        ..form()
    };
    assert!(matches!(
        SeminarService::edit_seminar(&db, &ValidationRules::default(), id, PARTICIPANT, edit)
            .await,
        Err(ServiceError::Forbidden)
    ));
    assert_eq!(
        SeminarService::get_details(&db, id).await.unwrap().topic,
        "AI Basics"
    );
}

#[tokio::test]
async fn test_edit_form_lists_seeded_categories() {
    let db = setup().await;
    let id = create(&db).await;

    let edit_form = SeminarService::get_edit_form(&db, id).await.unwrap();
    assert_eq!(edit_form.id, id);
    assert_eq!(edit_form.form, form());

    let names: Vec<_> = edit_form.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Technology", "Business", "Science", "Arts"]);
}

#[tokio::test]
async fn test_delete_info() {
    let db = setup().await;
    let id = create(&db).await;

    let info = SeminarService::get_delete_info(&db, id).await.unwrap();
    assert_eq!(info.id, id);
    assert_eq!(info.topic, "AI Basics");
    assert_eq!(info.date_and_time, "03/15/2025 14:00");
}

#[tokio::test]
async fn test_create_category() {
    let db = setup().await;
    let rules = ValidationRules::default();

    let id = CategoryService::create_category(&db, &rules, "Medicine")
        .await
        .unwrap();
    assert!(CategoryService::exists(&db, id).await.unwrap());

    assert!(matches!(
        CategoryService::create_category(&db, &rules, "AI").await,
        Err(ServiceError::Validation(_))
    ));
    assert_eq!(CategoryService::list_categories(&db).await.unwrap().len(), 5);
}
