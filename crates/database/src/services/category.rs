use crate::{entities::categories, error::ServiceError};
use log::info;
use models::{
    seminar_data::CategoryOption,
    validation::{ValidationRules, validate_category_name},
};
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
};

pub struct CategoryService;

impl CategoryService {
    /// All categories, for populating seminar forms
    pub async fn list_categories<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<Vec<CategoryOption>, DbErr> {
        let categories = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .all(conn)
            .await?;

        Ok(categories
            .into_iter()
            .map(|category| CategoryOption {
                id: category.id,
                name: category.name,
            })
            .collect())
    }

    /// Adds a category. Administrative only; nothing user-facing calls this.
    pub async fn create_category(
        db: &DatabaseConnection,
        rules: &ValidationRules,
        name: &str,
    ) -> Result<i32, ServiceError> {
        validate_category_name(name, rules)?;

        let category = categories::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        };
        let id = categories::Entity::insert(category)
            .exec(db)
            .await?
            .last_insert_id;

        info!("Created category {id} ({name})");
        Ok(id)
    }

    pub async fn exists<C: ConnectionTrait>(conn: &C, category_id: i32) -> Result<bool, DbErr> {
        let count = categories::Entity::find_by_id(category_id)
            .count(conn)
            .await?;

        Ok(count > 0)
    }
}
