use crate::{
    entities::{categories, seminar_participants, seminars, users},
    error::ServiceError,
    services::category::CategoryService,
};
use log::{debug, info, warn};
use models::{
    seminar_data::{
        SeminarDeleteInfo, SeminarDetails, SeminarEditForm, SeminarForm, SeminarInfo,
        SeminarInput,
    },
    validation::{Field, ValidationErrors, ValidationRules, format_date_and_time},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::{NotSet, Set}, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select, TransactionTrait, prelude::DateTime,
};

pub struct SeminarService;

/// A seminar joined with its category name and organizer display name
#[derive(Debug, FromQueryResult)]
struct SeminarRow {
    id: i32,
    topic: String,
    lecturer: String,
    details: String,
    date_and_time: DateTime,
    duration: i32,
    category: String,
    organizer: Option<String>,
}

impl From<SeminarRow> for SeminarInfo {
    fn from(row: SeminarRow) -> Self {
        SeminarInfo {
            id: row.id,
            topic: row.topic,
            lecturer: row.lecturer,
            details: row.details,
            date_and_time: format_date_and_time(&row.date_and_time),
            category: row.category,
            organizer: row.organizer.unwrap_or_default(),
        }
    }
}

impl From<SeminarRow> for SeminarDetails {
    fn from(row: SeminarRow) -> Self {
        SeminarDetails {
            id: row.id,
            topic: row.topic,
            lecturer: row.lecturer,
            details: row.details,
            date_and_time: format_date_and_time(&row.date_and_time),
            duration: row.duration,
            category: row.category,
            organizer: row.organizer.unwrap_or_default(),
        }
    }
}

impl SeminarService {
    /// Seminars that have not been soft-deleted. Every read starts here.
    fn active() -> Select<seminars::Entity> {
        seminars::Entity::find().filter(seminars::Column::IsDeleted.eq(false))
    }

    /// Active seminars projected with category and organizer names
    fn active_rows() -> Select<seminars::Entity> {
        Self::active()
            .select_only()
            .columns([
                seminars::Column::Id,
                seminars::Column::Topic,
                seminars::Column::Lecturer,
                seminars::Column::Details,
                seminars::Column::DateAndTime,
                seminars::Column::Duration,
            ])
            .column_as(categories::Column::Name, "category")
            .column_as(users::Column::UserName, "organizer")
            .join(JoinType::InnerJoin, seminars::Relation::Category.def())
            .join(JoinType::LeftJoin, seminars::Relation::Organizer.def())
            .order_by_asc(seminars::Column::Id)
    }

    async fn find_active<C: ConnectionTrait>(
        conn: &C,
        seminar_id: i32,
    ) -> Result<seminars::Model, ServiceError> {
        Self::active()
            .filter(seminars::Column::Id.eq(seminar_id))
            .one(conn)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    /// Runs the pure field rules and the category lookup, reporting both together
    async fn validate_form<C: ConnectionTrait>(
        conn: &C,
        rules: &ValidationRules,
        form: &SeminarForm,
    ) -> Result<SeminarInput, ServiceError> {
        let category_exists = CategoryService::exists(conn, form.category_id).await?;

        let mut errors = match form.validate(rules) {
            Ok(input) if category_exists => return Ok(input),
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if !category_exists {
            errors.add(Field::CategoryId, "The selected category does not exist.");
        }

        debug!("Rejected seminar form: {errors}");
        Err(ServiceError::Validation(errors))
    }

    /// Creates a seminar owned by `organizer_id` and returns its id
    pub async fn create_seminar(
        db: &DatabaseConnection,
        rules: &ValidationRules,
        organizer_id: &str,
        form: SeminarForm,
    ) -> Result<i32, ServiceError> {
        let txn = db.begin().await?;
        let input = Self::validate_form(&txn, rules, &form).await?;

        let seminar = seminars::ActiveModel {
            id: NotSet,
            topic: Set(input.topic),
            lecturer: Set(input.lecturer),
            details: Set(input.details),
            organizer_id: Set(organizer_id.to_string()),
            date_and_time: Set(input.date_and_time),
            duration: Set(input.duration),
            category_id: Set(input.category_id),
            is_deleted: Set(false),
        };
        let seminar_id = seminars::Entity::insert(seminar)
            .exec(&txn)
            .await?
            .last_insert_id;

        txn.commit().await?;
        info!("Seminar {seminar_id} created by {organizer_id}");
        Ok(seminar_id)
    }

    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<SeminarInfo>, ServiceError> {
        let rows = Self::active_rows()
            .into_model::<SeminarRow>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(SeminarInfo::from).collect())
    }

    /// Active seminars the participant has joined
    pub async fn list_joined(
        db: &DatabaseConnection,
        participant_id: &str,
    ) -> Result<Vec<SeminarInfo>, ServiceError> {
        let rows = Self::active_rows()
            .join(
                JoinType::InnerJoin,
                seminars::Relation::SeminarParticipants.def(),
            )
            .filter(seminar_participants::Column::ParticipantId.eq(participant_id))
            .into_model::<SeminarRow>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(SeminarInfo::from).collect())
    }

    /// Adds the participant to an active seminar.
    ///
    /// The pre-check reports `AlreadyJoined`; a concurrent join that slips past it is
    /// stopped by the primary key and reported as `ConstraintViolation`.
    pub async fn join(
        db: &DatabaseConnection,
        seminar_id: i32,
        participant_id: &str,
    ) -> Result<(), ServiceError> {
        let txn = db.begin().await?;
        Self::find_active(&txn, seminar_id).await?;

        let existing =
            seminar_participants::Entity::find_by_id((seminar_id, participant_id.to_string()))
                .one(&txn)
                .await?;
        if existing.is_some() {
            debug!("{participant_id} already joined seminar {seminar_id}");
            return Err(ServiceError::AlreadyJoined);
        }

        let membership = seminar_participants::ActiveModel {
            seminar_id: Set(seminar_id),
            participant_id: Set(participant_id.to_string()),
        };
        seminar_participants::Entity::insert(membership)
            .exec_without_returning(&txn)
            .await
            .map_err(ServiceError::from_insert)?;

        txn.commit().await?;
        info!("{participant_id} joined seminar {seminar_id}");
        Ok(())
    }

    pub async fn leave(
        db: &DatabaseConnection,
        seminar_id: i32,
        participant_id: &str,
    ) -> Result<(), ServiceError> {
        let txn = db.begin().await?;
        Self::find_active(&txn, seminar_id).await?;

        let result = seminar_participants::Entity::delete_by_id((
            seminar_id,
            participant_id.to_string(),
        ))
        .exec(&txn)
        .await?;
        if result.rows_affected == 0 {
            debug!("{participant_id} is not a participant of seminar {seminar_id}");
            return Err(ServiceError::NotFound);
        }

        txn.commit().await?;
        info!("{participant_id} left seminar {seminar_id}");
        Ok(())
    }

    pub async fn get_details(
        db: &DatabaseConnection,
        seminar_id: i32,
    ) -> Result<SeminarDetails, ServiceError> {
        Self::active_rows()
            .filter(seminars::Column::Id.eq(seminar_id))
            .into_model::<SeminarRow>()
            .one(db)
            .await?
            .map(SeminarDetails::from)
            .ok_or(ServiceError::NotFound)
    }

    /// The stored seminar as an editable form, with the selectable categories
    pub async fn get_edit_form(
        db: &DatabaseConnection,
        seminar_id: i32,
    ) -> Result<SeminarEditForm, ServiceError> {
        let seminar = Self::find_active(db, seminar_id).await?;
        let categories = CategoryService::list_categories(db).await?;

        Ok(SeminarEditForm {
            id: seminar.id,
            form: SeminarForm {
                topic: seminar.topic,
                lecturer: seminar.lecturer,
                details: seminar.details,
                date_and_time: format_date_and_time(&seminar.date_and_time),
                duration: Some(seminar.duration),
                category_id: seminar.category_id,
            },
            categories,
        })
    }

    /// Overwrites the editable fields of an active seminar.
    ///
    /// Only the organizer may edit. On a validation failure the stored row is left
    /// untouched and the field errors are returned for the form to show.
    pub async fn edit_seminar(
        db: &DatabaseConnection,
        rules: &ValidationRules,
        seminar_id: i32,
        caller_id: &str,
        form: SeminarForm,
    ) -> Result<(), ServiceError> {
        let txn = db.begin().await?;
        let seminar = Self::find_active(&txn, seminar_id).await?;

        if seminar.organizer_id != caller_id {
            warn!("{caller_id} tried to edit seminar {seminar_id} they do not organize");
            return Err(ServiceError::Forbidden);
        }

        let input = Self::validate_form(&txn, rules, &form).await?;

        let mut seminar: seminars::ActiveModel = seminar.into();
        seminar.topic = Set(input.topic);
        seminar.lecturer = Set(input.lecturer);
        seminar.details = Set(input.details);
        seminar.date_and_time = Set(input.date_and_time);
        seminar.duration = Set(input.duration);
        seminar.category_id = Set(input.category_id);
        seminar.update(&txn).await?;

        txn.commit().await?;
        info!("Seminar {seminar_id} edited by {caller_id}");
        Ok(())
    }

    /// What the organizer sees before confirming a delete
    pub async fn get_delete_info(
        db: &DatabaseConnection,
        seminar_id: i32,
    ) -> Result<SeminarDeleteInfo, ServiceError> {
        let seminar = Self::find_active(db, seminar_id).await?;

        Ok(SeminarDeleteInfo {
            id: seminar.id,
            topic: seminar.topic,
            date_and_time: format_date_and_time(&seminar.date_and_time),
        })
    }

    /// Marks a seminar deleted. There is no way back; memberships are kept but no
    /// longer visible because every query filters on the flag.
    pub async fn soft_delete(
        db: &DatabaseConnection,
        seminar_id: i32,
        caller_id: &str,
    ) -> Result<(), ServiceError> {
        let txn = db.begin().await?;
        let seminar = Self::find_active(&txn, seminar_id).await?;

        if seminar.organizer_id != caller_id {
            warn!("{caller_id} tried to delete seminar {seminar_id} they do not organize");
            return Err(ServiceError::Forbidden);
        }

        let mut seminar: seminars::ActiveModel = seminar.into();
        seminar.is_deleted = Set(true);
        seminar.update(&txn).await?;

        txn.commit().await?;
        info!("Seminar {seminar_id} deleted by {caller_id}");
        Ok(())
    }
}
